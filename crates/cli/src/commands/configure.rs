use lolslack_core::{ConfigStore, Plugin};
use lolslack_slack::{PLUGIN_NAME, SlackConfig, SlackPlugin};
use tracing::info;

pub fn run(mut store: ConfigStore, slack_config: SlackConfig) -> anyhow::Result<()> {
    let plugin = SlackPlugin::new(store.plugin(PLUGIN_NAME), slack_config)?;

    let mut input = std::io::stdin().lock();
    let mut out = std::io::stdout();
    let options = plugin.configure_options(&mut input, &mut out)?;

    store.set_plugin(plugin.name(), options);
    store.save()?;

    info!(path = %store.path().display(), "slack options saved");
    println!(
        "Successfully configured plugin: {} at path '{}'",
        plugin.name(),
        store.path().display()
    );
    Ok(())
}
