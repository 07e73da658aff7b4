use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PluginConfig;
use crate::error::ConfigError;

/// TOML file holding one table of options per plugin.
///
/// The store is the only persisted state; uploads never write to it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    plugins: BTreeMap<String, PluginConfig>,
}

impl ConfigStore {
    /// Load the store at `path`. A missing file yields an empty store; any
    /// other read failure is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, starting empty");
                return Ok(Self {
                    path,
                    plugins: BTreeMap::new(),
                });
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let plugins = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, plugins })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored options for `name`, or the defaults if none were saved.
    pub fn plugin(&self, name: &str) -> PluginConfig {
        self.plugins.get(name).cloned().unwrap_or_default()
    }

    pub fn set_plugin(&mut self, name: impl Into<String>, config: PluginConfig) {
        self.plugins.insert(name.into(), config);
    }

    /// Write the store back to its file, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        let rendered = toml::to_string(&self.plugins)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, rendered).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), plugins = self.plugins.len(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(store.plugin("slack"), PluginConfig::default());
    }

    #[test]
    fn save_then_load_preserves_plugin_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lolslack.toml");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set_plugin("slack", PluginConfig::enabled_with("abc-def", "c1,c3,c4"));
        store.save().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(
            reloaded.plugin("slack"),
            PluginConfig::enabled_with("abc-def", "c1,c3,c4")
        );
        assert_eq!(reloaded.plugin("other"), PluginConfig::default());
    }

    #[test]
    fn reads_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lolslack.toml");
        std::fs::write(
            &path,
            "[slack]\nenabled = false\naccess_token = \"tok\"\nchannels = \"c1\"\n",
        )
        .unwrap();

        let cfg = ConfigStore::load(&path).unwrap().plugin("slack");
        assert!(!cfg.is_enabled());
        assert!(cfg.is_configured());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_path_is_io_error_not_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lolslack.toml");
        std::fs::write(&file, "[slack]\nenabled = true\n").unwrap();

        // A regular file used as a directory fails with ENOTDIR, not NotFound.
        let err = ConfigStore::load(file.join("nested.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lolslack.toml");
        std::fs::write(&path, "[slack\nenabled = ").unwrap();

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
