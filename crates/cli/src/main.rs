//! lolslack CLI
//!
//! A minimal host for the Slack notifier: stores its options and runs the
//! capture-ready hook once a commit snapshot has been written to disk.

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lolslack_core::ConfigStore;
use lolslack_slack::SlackConfig;
use lolslack_slack::config::DEFAULT_API_BASE_URL;
use tracing_subscriber::{EnvFilter, fmt};

/// Post commit snapshots to Slack.
#[derive(Parser, Debug)]
#[command(name = "lolslack", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        env = "LOLSLACK_CONFIG",
        default_value = "lolslack.toml",
        global = true
    )]
    config: PathBuf,

    /// Slack Web API base URL.
    #[arg(
        long,
        env = "SLACK_API_BASE_URL",
        default_value = DEFAULT_API_BASE_URL,
        global = true
    )]
    api_base_url: String,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "LOLSLACK_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactively configure the Slack plugin.
    Configure,
    /// Post a captured snapshot to Slack (the host's capture-ready hook).
    CaptureReady(commands::capture::CaptureArgs),
    /// Show whether the Slack plugin is enabled and configured.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = ConfigStore::load(&cli.config)?;
    let slack_config = SlackConfig::new()
        .with_api_base_url(&cli.api_base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    match cli.command {
        Command::Configure => commands::configure::run(store, slack_config),
        Command::CaptureReady(args) => commands::capture::run(&store, slack_config, &args).await,
        Command::Status => commands::status::run(&store, &cli.format),
    }
}
