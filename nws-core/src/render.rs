use std::fmt;

use crate::{
    format::{self, NOT_AVAILABLE},
    model::{Forecast, ForecastPeriod, Observation},
};

/// Forecasts show at most this many periods (seven days of day/night pairs).
pub const MAX_FORECAST_PERIODS: usize = 14;

const DIVIDER: &str = "========================================";

pub const NO_FORECAST: &str = "No forecast data available";

/// Fixed-layout report for a single observation.
pub fn render_current(observation: &Observation) -> String {
    CurrentReport(observation).to_string().trim().to_string()
}

/// Fixed-layout report for the first [`MAX_FORECAST_PERIODS`] periods.
pub fn render_forecast(forecast: &Forecast) -> String {
    if forecast.periods.is_empty() {
        return NO_FORECAST.to_string();
    }

    ForecastReport(forecast).to_string().trim().to_string()
}

struct CurrentReport<'a>(&'a Observation);

impl fmt::Display for CurrentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = self.0;

        writeln!(
            f,
            "Current Weather for {}",
            format::station_id(obs.station.as_deref())
        )?;
        writeln!(f, "{DIVIDER}")?;
        writeln!(f, "Time: {}", obs.timestamp.as_deref().unwrap_or("Unknown"))?;
        writeln!(
            f,
            "Conditions: {}",
            obs.text_description.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(f, "Temperature: {}", format::temperature(&obs.temperature))?;
        if let Some(feels_like) = format::feels_like(&obs.wind_chill, &obs.heat_index) {
            writeln!(f, "Feels Like: {feels_like}")?;
        }
        writeln!(f, "Dewpoint: {}", format::temperature(&obs.dewpoint))?;
        writeln!(
            f,
            "Wind: {}",
            format::wind(&obs.wind_speed, &obs.wind_direction)
        )?;
        writeln!(f, "Humidity: {}", format::humidity(&obs.relative_humidity))?;
        writeln!(f, "Pressure: {}", format::pressure(&obs.barometric_pressure))?;
        writeln!(f, "Visibility: {}", format::visibility(&obs.visibility))?;
        writeln!(f, "Cloud Layers: {}", format::cloud_layers(&obs.cloud_layers))?;
        writeln!(
            f,
            "Precipitation (last hour): {}",
            format::precipitation(&obs.precipitation_last_hour)
        )
    }
}

struct ForecastReport<'a>(&'a Forecast);

impl fmt::Display for ForecastReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weather Forecast")?;
        writeln!(f, "{DIVIDER}")?;
        writeln!(f)?;

        for period in self.0.periods.iter().take(MAX_FORECAST_PERIODS) {
            write_period(f, period)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

fn write_period(f: &mut fmt::Formatter<'_>, period: &ForecastPeriod) -> fmt::Result {
    let temperature = period
        .temperature
        .map_or_else(|| NOT_AVAILABLE.to_string(), |t| t.to_string());

    writeln!(f, "{}:", period.name.as_deref().unwrap_or("Unknown"))?;
    writeln!(
        f,
        "  Temperature: {temperature}°{}",
        period.temperature_unit.as_deref().unwrap_or("F")
    )?;
    writeln!(
        f,
        "  {}",
        period.short_forecast.as_deref().unwrap_or(NOT_AVAILABLE)
    )?;

    match period.detailed_forecast.as_deref() {
        Some(detailed) if !detailed.is_empty() => writeln!(f, "  {detailed}"),
        _ => Ok(()),
    }
}
