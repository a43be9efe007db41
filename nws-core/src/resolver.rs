use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{Error, Missing, Result, TransportError},
    http::{Fetch, HttpFetcher},
    model::{
        Coordinates, Feature, Forecast, GridPoint, Observation, StationCode, StationFeature,
    },
};

/// Walks the service from a station code to an observation or a forecast.
///
/// Every request is awaited before the next one is issued, and the first
/// failure ends the chain.
#[derive(Debug)]
pub struct Resolver {
    config: ClientConfig,
    http: Box<dyn Fetch>,
}

impl Resolver {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Box::new(http)))
    }

    pub fn with_fetcher(config: ClientConfig, http: Box<dyn Fetch>) -> Self {
        Self { config, http }
    }

    /// Latest observation for `station`. One request.
    pub async fn fetch_current(&self, station: &StationCode) -> Result<Observation> {
        let url = self.config.latest_observation_url(station.as_str());
        let feature: Feature<Observation> = self.get_json(&url).await?;
        Ok(feature.properties)
    }

    /// Forecast for the grid cell containing `station`. Three requests:
    /// station metadata, point lookup, then the forecast itself.
    pub async fn fetch_forecast(&self, station: &StationCode) -> Result<Forecast> {
        let coordinates = self.station_coordinates(station).await?;
        let grid = self.grid_point(coordinates).await?;

        let Some(url) = grid.forecast_url() else {
            warn!(%station, "point lookup has no forecast reference");
            return Err(Error::Resolution(Missing::ForecastUrl));
        };

        debug!(%station, url, "fetching forecast");
        let feature: Feature<Forecast> = self.get_json(url).await?;
        Ok(feature.properties)
    }

    pub async fn station_coordinates(&self, station: &StationCode) -> Result<Coordinates> {
        let url = self.config.station_url(station.as_str());
        let feature: StationFeature = self.get_json(&url).await?;

        let coordinates =
            Coordinates::from_geometry(&feature.geometry.coordinates).ok_or_else(|| {
                warn!(%station, "station metadata has no usable coordinates");
                Error::Resolution(Missing::Coordinates)
            })?;

        debug!(
            %station,
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "resolved station coordinates"
        );
        Ok(coordinates)
    }

    pub async fn grid_point(&self, coordinates: Coordinates) -> Result<GridPoint> {
        let url = self
            .config
            .points_url(coordinates.latitude, coordinates.longitude);
        let feature: Feature<GridPoint> = self.get_json(&url).await?;
        Ok(feature.properties)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.http.get(url).await?;

        serde_json::from_str(&body).map_err(|source| {
            Error::Transport(TransportError::Decode {
                url: url.to_string(),
                source,
            })
        })
    }
}
