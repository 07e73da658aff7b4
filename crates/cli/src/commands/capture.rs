use std::path::PathBuf;

use clap::Args;
use lolslack_core::{ConfigStore, Plugin, UploadTarget};
use lolslack_slack::{PLUGIN_NAME, SlackConfig, SlackPlugin};
use tracing::info;

#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Path of the captured snapshot.
    #[arg(long)]
    pub image: PathBuf,
    /// Commit SHA, used as the uploaded filename.
    #[arg(long)]
    pub sha: String,
    /// Commit message.
    #[arg(long)]
    pub message: String,
    /// Repository display name.
    #[arg(long)]
    pub repo: String,
}

/// Upload failures are reported on stdout and never turn into a non-zero
/// exit status.
pub async fn run(
    store: &ConfigStore,
    slack_config: SlackConfig,
    args: &CaptureArgs,
) -> anyhow::Result<()> {
    let plugin = SlackPlugin::new(store.plugin(PLUGIN_NAME), slack_config)?;

    if !plugin.is_enabled() {
        info!(plugin = PLUGIN_NAME, "plugin disabled, skipping");
        return Ok(());
    }

    let target = UploadTarget::new(&args.image, &args.sha, &args.message, &args.repo);
    plugin
        .run_capture_ready(&target, &mut std::io::stdout())
        .await;
    Ok(())
}
