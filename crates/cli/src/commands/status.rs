use lolslack_core::{ConfigStore, Plugin};
use lolslack_slack::{PLUGIN_NAME, SlackConfig, SlackPlugin};

use crate::OutputFormat;

pub fn run(store: &ConfigStore, format: &OutputFormat) -> anyhow::Result<()> {
    let plugin = SlackPlugin::new(store.plugin(PLUGIN_NAME), SlackConfig::new())?;

    let enabled = plugin.is_enabled();
    let configured = plugin.is_configured();
    let valid = plugin.is_valid_configuration();

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "plugin": plugin.name(),
                "config_path": store.path().display().to_string(),
                "enabled": enabled,
                "configured": configured,
                "valid": valid,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{} ({})", plugin.name(), store.path().display());
            println!("  enabled:    {enabled}");
            println!("  configured: {configured}");
            println!("  valid:      {valid}");
        }
    }

    Ok(())
}
