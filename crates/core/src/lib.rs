//! Host-facing contract for lolslack plugins: the upload target, stored
//! plugin options, and the [`Plugin`] trait.

pub mod config;
pub mod error;
pub mod plugin;
pub mod store;
pub mod target;

pub use config::{Credentials, PluginConfig};
pub use error::ConfigError;
pub use plugin::Plugin;
pub use store::ConfigStore;
pub use target::UploadTarget;
