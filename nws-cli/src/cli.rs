use anyhow::{Context, Result};
use clap::Parser;
use nws_core::{ClientConfig, Error, Resolver, StationCode, render_current, render_forecast};
use tracing::debug;

/// Get weather information from the National Weather Service.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about)]
pub struct Cli {
    /// 4-letter ICAO station code (e.g., KMPR, KJFK, KSFO).
    #[arg(short, long)]
    pub location: String,

    /// Get forecast instead of current weather.
    #[arg(short, long)]
    pub forecast: bool,

    /// Log each request to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve and render the requested report.
    pub async fn run(self) -> Result<String> {
        self.run_with(|| Resolver::new(ClientConfig::default())).await
    }

    async fn run_with(
        &self,
        resolver: impl FnOnce() -> Result<Resolver, Error>,
    ) -> Result<String> {
        // The station code is checked before the HTTP client exists.
        let station = StationCode::try_from(self.location.as_str()).context("Error")?;
        debug!(%station, forecast = self.forecast, "resolving");

        let resolver = resolver().context("Error")?;

        if self.forecast {
            let forecast = resolver
                .fetch_forecast(&station)
                .await
                .map_err(|err| describe(err, "Error fetching forecast"))?;
            Ok(render_forecast(&forecast))
        } else {
            let observation = resolver
                .fetch_current(&station)
                .await
                .map_err(|err| describe(err, "Error fetching current weather"))?;
            Ok(render_current(&observation))
        }
    }
}

/// Transport failures name the operation; everything else is a plain `Error:`.
fn describe(err: Error, fetching: &'static str) -> anyhow::Error {
    let context = if err.is_transport() { fetching } else { "Error" };
    anyhow::Error::new(err).context(context)
}
