use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, writing, or capturing plugin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The in-memory configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Reading an answer from the interactive prompt failed.
    #[error("failed to read configuration input: {0}")]
    Prompt(#[source] std::io::Error),

    /// The plugin has no usable credentials.
    #[error("plugin '{0}' is missing an access token or channel list")]
    NotConfigured(String),
}
