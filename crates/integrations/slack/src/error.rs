use std::path::PathBuf;

use thiserror::Error;

use crate::session::UploadStep;

/// Errors a single upload step can produce.
///
/// Every variant is retried under the same per-step budget; the upload flow
/// does not distinguish transient from permanent failures.
#[derive(Debug, Error)]
pub enum SlackError {
    /// Connection, TLS, timeout, or non-success HTTP status.
    #[error("{}", transport_message(.0))]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected structure.
    #[error("unexpected response from {method}: {reason}")]
    Protocol {
        method: &'static str,
        reason: String,
    },

    /// Slack answered `ok: false`.
    #[error("{method} failed: {reason}")]
    Rejected {
        method: &'static str,
        reason: String,
    },

    /// The artifact file could not be read.
    #[error("could not read artifact {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SlackError {
    pub(crate) fn protocol(method: &'static str, reason: impl Into<String>) -> Self {
        Self::Protocol {
            method,
            reason: reason.into(),
        }
    }

    pub(crate) fn rejected(method: &'static str, reason: Option<String>) -> Self {
        Self::Rejected {
            method,
            reason: reason.unwrap_or_else(|| "unknown_error".to_owned()),
        }
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Timed out connecting to server".to_owned()
    } else if let Some(status) = err.status() {
        format!("server responded with HTTP {status}")
    } else if err.is_connect() {
        "Unable to connect to server".to_owned()
    } else {
        err.to_string()
    }
}

/// Terminal failure of an upload session: the step whose retry budget ran
/// out and the last error it saw.
///
/// Displays as the underlying error alone, since that is what the user is
/// shown.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct StepFailure {
    pub step: UploadStep,
    pub attempts: u32,
    #[source]
    pub source: SlackError,
}
