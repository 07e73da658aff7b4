use std::io::{BufRead, Write};

use crate::config::PluginConfig;
use crate::error::ConfigError;
use crate::target::UploadTarget;

/// A notifier the host runs once an artifact has been captured.
///
/// This trait uses native `async fn` (desugared to `impl Future`) and is
/// therefore not object-safe; hosts hold concrete plugin types.
pub trait Plugin: Send + Sync {
    /// Returns the unique name of this plugin, also its config table name.
    fn name(&self) -> &str;

    /// The stored options this plugin was built with.
    fn configuration(&self) -> &PluginConfig;

    fn is_enabled(&self) -> bool {
        self.configuration().is_enabled()
    }

    fn is_configured(&self) -> bool {
        self.configuration().is_configured()
    }

    fn is_valid_configuration(&self) -> bool {
        self.is_enabled() && self.is_configured()
    }

    /// Capture-ready hook, invoked exactly once per finalized artifact.
    ///
    /// Progress and failure text goes to `out`. Implementations must not
    /// fail: every error is reported on `out` and swallowed.
    fn run_capture_ready(
        &self,
        target: &UploadTarget,
        out: &mut (dyn Write + Send),
    ) -> impl std::future::Future<Output = ()> + Send;

    /// Interactively collect options, reading answers from `input` and
    /// writing prompts to `out`.
    fn configure_options(
        &self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<PluginConfig, ConfigError>;
}
