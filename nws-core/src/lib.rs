//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Connection settings for the National Weather Service API
//! - The resolution chain from a station code to an observation or forecast
//! - Response models tolerant of missing fields
//! - Field formatting and the fixed-layout text reports
//!
//! It is used by `nws-cli`, but the resolver and renderers can be reused on their own.

pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod model;
pub mod render;
pub mod resolver;

pub use config::ClientConfig;
pub use error::{Error, Missing, TransportError};
pub use http::{Fetch, HttpFetcher};
pub use model::{
    CloudLayer, Coordinates, Forecast, ForecastPeriod, GridPoint, Measurement, Observation,
    StationCode,
};
pub use render::{render_current, render_forecast};
pub use resolver::Resolver;
