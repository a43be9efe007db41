use std::fmt;

use reqwest::{
    StatusCode,
    header::{HeaderName, InvalidHeaderValue},
};
use thiserror::Error;

/// Failures raised while talking to the service or decoding what it sent back.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("invalid {name} header value")]
    Header {
        name: HeaderName,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status} for url {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A field the resolution chain needs in order to take its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Coordinates,
    ForecastUrl,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Missing::Coordinates => "station coordinates",
            Missing::ForecastUrl => "forecast URL",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Station code must be 4 characters (got '{0}')")]
    InvalidStation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Could not determine {0}")]
    Resolution(Missing),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, Error::Resolution(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
