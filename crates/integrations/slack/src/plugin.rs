use std::io::{BufRead, Write};

use lolslack_core::{ConfigError, Credentials, Plugin, PluginConfig, UploadTarget};
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::config::SlackConfig;
use crate::error::SlackError;
use crate::prompt;
use crate::session::UploadSession;

/// Name of the plugin and of its table in the config file.
pub const PLUGIN_NAME: &str = "slack";

const PROGRESS: &str = "Posting to Slack ... ";
const CONFIG_HINT: &str = "Try running config again:\n\tlolcommits --config -p slack\n";

/// Posts each captured commit snapshot to the configured Slack channels.
///
/// Every invocation builds a fresh [`UploadSession`]; nothing is carried
/// from one artifact to the next.
pub struct SlackPlugin {
    options: PluginConfig,
    config: SlackConfig,
    client: Client,
}

impl SlackPlugin {
    /// Create a plugin from stored options and transport settings.
    pub fn new(options: PluginConfig, config: SlackConfig) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(options, config, client))
    }

    /// Create a plugin with a custom HTTP client.
    ///
    /// The client's own timeout settings are used as-is.
    pub fn with_client(options: PluginConfig, config: SlackConfig, client: Client) -> Self {
        Self {
            options,
            config,
            client,
        }
    }

    /// Upload `target` with `credentials` and report the outcome on `out`.
    ///
    /// Prints `Posting to Slack ... ` before any request, then either
    /// `done!` or `failed! <reason>` followed by a hint to rerun
    /// configuration. Never returns an error: the failure text is the only
    /// trace the host sees.
    #[instrument(skip_all, fields(plugin = PLUGIN_NAME, sha = %target.sha))]
    pub async fn on_artifact_ready(
        &self,
        target: &UploadTarget,
        credentials: &Credentials,
        out: &mut (dyn Write + Send),
    ) {
        emit(out, PROGRESS);

        let mut session = UploadSession::new(&self.client, &self.config, target, credentials);
        match session.run().await {
            Ok(allocation) => {
                info!(
                    file_id = %allocation.file_id,
                    channels = credentials.channels.len(),
                    "posted snapshot to slack"
                );
                emit(out, "done!\n");
            }
            Err(failure) => {
                warn!(
                    step = %failure.step,
                    attempts = failure.attempts,
                    error = %failure,
                    "giving up on slack upload"
                );
                report_failure(out, &failure);
            }
        }
    }
}

impl Plugin for SlackPlugin {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn configuration(&self) -> &PluginConfig {
        &self.options
    }

    async fn run_capture_ready(&self, target: &UploadTarget, out: &mut (dyn Write + Send)) {
        match Credentials::from_config(&self.options) {
            Some(credentials) => self.on_artifact_ready(target, &credentials, out).await,
            None => {
                emit(out, PROGRESS);
                report_failure(out, &ConfigError::NotConfigured(PLUGIN_NAME.to_owned()));
            }
        }
    }

    fn configure_options(
        &self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<PluginConfig, ConfigError> {
        prompt::collect_options(input, out)
    }
}

fn report_failure(out: &mut (dyn Write + Send), reason: &dyn std::fmt::Display) {
    emit(out, &format!("failed! {reason}\n{CONFIG_HINT}"));
}

/// Write user-facing text and flush it so it shows up immediately.
fn emit(out: &mut (dyn Write + Send), text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        warn!("failed to write progress output (non-critical): {e}");
    }
}
