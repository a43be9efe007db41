use std::time::Duration;

/// Default service root for every request the resolver issues.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// The service rejects anonymous clients, so every request identifies itself.
pub const DEFAULT_USER_AGENT: &str = "(Weather CLI Tool, contact@example.com)";

pub const DEFAULT_ACCEPT: &str = "application/json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings shared by every request in a resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root without a trailing slash, e.g. `https://api.weather.gov`.
    pub base_url: String,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Value of the `Accept` header.
    pub accept: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Point the client at another service root. A trailing `/` is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn latest_observation_url(&self, station: &str) -> String {
        format!("{}/stations/{station}/observations/latest", self.base_url)
    }

    pub(crate) fn station_url(&self, station: &str) -> String {
        format!("{}/stations/{station}", self.base_url)
    }

    /// Point lookups take latitude first.
    pub(crate) fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{latitude},{longitude}", self.base_url)
    }
}
