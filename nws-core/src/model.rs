use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// A 4-character ICAO station identifier, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    pub const LEN: usize = 4;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for StationCode {
    type Error = Error;

    /// Only the length is checked; any 4 characters are accepted.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.chars().count() != Self::LEN {
            return Err(Error::InvalidStation(value.to_string()));
        }

        Ok(StationCode(value.to_uppercase()))
    }
}

/// A `{ value, unitCode }` pair as reported by the service. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub value: Option<f64>,
    pub unit_code: Option<String>,
}

impl Measurement {
    pub fn new(value: f64, unit_code: &str) -> Self {
        Self {
            value: Some(value),
            unit_code: Some(unit_code.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CloudLayer {
    pub amount: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub base: Measurement,
}

/// Latest observation for a station (`properties` of the observation feature).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// URL of the reporting station.
    pub station: Option<String>,
    pub timestamp: Option<String>,
    pub text_description: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub temperature: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub dewpoint: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub wind_speed: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub wind_direction: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub relative_humidity: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub barometric_pressure: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub visibility: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub wind_chill: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub heat_index: Measurement,
    #[serde(default, deserialize_with = "nullable")]
    pub precipitation_last_hour: Measurement,

    #[serde(default, deserialize_with = "nullable")]
    pub cloud_layers: Vec<CloudLayer>,
}

/// Station position as stored by the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// GeoJSON order is `[lon, lat, ...]`; extra components (elevation) are ignored.
    pub fn from_geometry(components: &[f64]) -> Option<Self> {
        match components {
            [longitude, latitude, ..] => Some(Self {
                longitude: *longitude,
                latitude: *latitude,
            }),
            _ => None,
        }
    }
}

/// Point lookup metadata (`properties` of the point feature).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GridPoint {
    pub forecast: Option<String>,
}

impl GridPoint {
    /// The forecast document URL; an empty string counts as absent.
    pub fn forecast_url(&self) -> Option<&str> {
        self.forecast.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub short_forecast: Option<String>,
    pub detailed_forecast: Option<String>,
}

/// Chronologically ordered forecast periods.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Forecast {
    #[serde(default, deserialize_with = "nullable")]
    pub periods: Vec<ForecastPeriod>,
}

/// GeoJSON feature wrapper; the payload lives under `properties`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub(crate) struct Feature<P> {
    #[serde(default, deserialize_with = "nullable")]
    pub properties: P,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StationFeature {
    #[serde(default, deserialize_with = "nullable")]
    pub geometry: Geometry,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Geometry {
    #[serde(default, deserialize_with = "nullable")]
    pub coordinates: Vec<f64>,
}

/// Treat an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
