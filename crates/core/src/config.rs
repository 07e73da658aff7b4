use serde::{Deserialize, Serialize};

/// Stored options for a single plugin.
///
/// This is the shape persisted by [`ConfigStore`](crate::ConfigStore) under
/// the plugin's table. The predicates below are pure functions of these
/// fields.
///
/// # Example
///
/// ```toml
/// [slack]
/// enabled = true
/// access_token = "xoxp-..."
/// channels = "C123,C456"
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Whether the host should run this plugin at all.
    #[serde(default)]
    pub enabled: bool,

    /// Bearer token used to authenticate API requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Comma-separated channel IDs, stored as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<String>,
}

impl std::fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginConfig")
            .field("enabled", &self.enabled)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("channels", &self.channels)
            .finish()
    }
}

impl PluginConfig {
    /// An enabled configuration carrying the given token and channel list.
    pub fn enabled_with(access_token: impl Into<String>, channels: impl Into<String>) -> Self {
        Self {
            enabled: true,
            access_token: Some(access_token.into()),
            channels: Some(channels.into()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Both the token and the channel list are present, regardless of
    /// `enabled`.
    pub fn is_configured(&self) -> bool {
        present(self.access_token.as_deref()) && present(self.channels.as_deref())
    }

    pub fn is_valid(&self) -> bool {
        self.is_enabled() && self.is_configured()
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Token and destinations needed to post an artifact.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub channels: Vec<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("channels", &self.channels)
            .finish()
    }
}

impl Credentials {
    pub fn new<I, S>(access_token: impl Into<String>, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            access_token: access_token.into(),
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Derive credentials from stored options.
    ///
    /// Returns `None` unless the configuration is
    /// [configured](PluginConfig::is_configured) and names at least one
    /// channel. Channel entries are trimmed and empty entries dropped.
    pub fn from_config(config: &PluginConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let token = config.access_token.as_deref()?.trim();
        let channels: Vec<String> = config
            .channels
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect();
        if channels.is_empty() {
            return None;
        }
        Some(Self {
            access_token: token.to_owned(),
            channels,
        })
    }

    /// Channel IDs joined with commas, as the completion call expects.
    pub fn joined_channels(&self) -> String {
        self.channels.join(",")
    }
}
