use std::time::Duration;

/// Default Slack Web API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

/// Per-request HTTP timeout applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings for talking to Slack.
///
/// Credentials are not part of this type; they come from the stored plugin
/// options on every upload.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Base URL for the Slack Web API. Override this for testing against a
    /// mock server.
    pub api_base_url: String,

    /// Timeout for each individual HTTP request.
    pub timeout: Duration,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SlackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the full URL for a Slack API method.
    pub fn api_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base_url)
    }
}
