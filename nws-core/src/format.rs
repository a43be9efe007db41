//! Display strings for individual observation fields.
//!
//! Every function here accepts possibly-missing input and falls back to
//! [`NOT_AVAILABLE`], so renderers never need to check for absence themselves.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{CloudLayer, Measurement};

pub const NOT_AVAILABLE: &str = "N/A";

const CELSIUS: &str = "degC";
const PASCALS_PER_MILLIBAR: f64 = 100.0;
const METERS_PER_MILE: f64 = 1609.34;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fixed-point text with ties rounded away from zero (`1013.25` -> `1013.3`).
///
/// Rounds the exact decimal value of the float, so `0.15` (really `0.1499...`)
/// still gives `0.1`.
pub fn fixed(value: f64, decimals: usize) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact
                .round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.decimals$}")
        }
        None => format!("{value:.decimals$}"),
    }
}

/// Last `:`-separated segment of a unit code (`wmoUnit:degC` -> `degC`).
pub fn unit_suffix(unit_code: Option<&str>) -> &str {
    unit_code
        .and_then(|code| code.rsplit(':').next())
        .unwrap_or_default()
}

/// Last `/`-separated segment of a station reference URL.
pub fn station_id(station: Option<&str>) -> &str {
    station
        .and_then(|url| url.rsplit('/').next())
        .unwrap_or("Unknown")
}

fn is_celsius(measurement: &Measurement) -> bool {
    unit_suffix(measurement.unit_code.as_deref()) == CELSIUS
}

/// `32.0°F (0.0°C)` for Celsius readings, `{value}°{unit}` otherwise.
pub fn temperature(measurement: &Measurement) -> String {
    let Some(value) = measurement.value else {
        return NOT_AVAILABLE.to_string();
    };

    if is_celsius(measurement) {
        format!(
            "{}°F ({}°C)",
            fixed(celsius_to_fahrenheit(value), 1),
            fixed(value, 1)
        )
    } else {
        format!(
            "{}°{}",
            fixed(value, 1),
            unit_suffix(measurement.unit_code.as_deref())
        )
    }
}

/// Wind chill wins over heat index; `None` when neither is reported.
pub fn feels_like(wind_chill: &Measurement, heat_index: &Measurement) -> Option<String> {
    [(wind_chill, "Wind Chill"), (heat_index, "Heat Index")]
        .into_iter()
        .find_map(|(measurement, label)| {
            let value = measurement.value?;
            let reading = if is_celsius(measurement) {
                format!("{}°F", fixed(celsius_to_fahrenheit(value), 1))
            } else {
                format!(
                    "{}°{}",
                    fixed(value, 1),
                    unit_suffix(measurement.unit_code.as_deref())
                )
            };
            Some(format!("{reading} ({label})"))
        })
}

/// Speed and direction together, or nothing at all.
pub fn wind(speed: &Measurement, direction: &Measurement) -> String {
    match (speed.value, direction.value) {
        (Some(speed), Some(direction)) => {
            format!("{} km/h from {direction}°", fixed(speed, 1))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn humidity(measurement: &Measurement) -> String {
    measurement
        .value
        .map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{}%", fixed(v, 0)))
}

/// Pascals to millibars.
pub fn pressure(measurement: &Measurement) -> String {
    measurement.value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |pa| format!("{} mb", fixed(pa / PASCALS_PER_MILLIBAR, 1)),
    )
}

/// Meters to statute miles.
pub fn visibility(measurement: &Measurement) -> String {
    measurement.value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |m| format!("{} mi", fixed(m / METERS_PER_MILE, 1)),
    )
}

pub fn precipitation(measurement: &Measurement) -> String {
    measurement
        .value
        .map_or_else(|| NOT_AVAILABLE.to_string(), |mm| format!("{} mm", fixed(mm, 2)))
}

/// `BKN at 1200m, OVC at 2400m`.
pub fn cloud_layers(layers: &[CloudLayer]) -> String {
    if layers.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    layers
        .iter()
        .map(|layer| {
            let base = layer
                .base
                .value
                .map_or_else(|| NOT_AVAILABLE.to_string(), |m| m.to_string());
            format!(
                "{} at {base}m",
                layer.amount.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
