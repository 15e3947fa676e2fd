//! Shared, reloadable configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::{Config, ViewConfig};
use crate::loader::DeliveryPolicy;

/// Config handle shared by hosts and the CLI. Clones see the same config.
///
/// Hosts snapshot what they need at creation, so a reload only affects host
/// instances created after it.
#[derive(Clone)]
pub struct ConfigStore {
    current: Arc<RwLock<Config>>,
    source: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, source: PathBuf) -> Self {
        Self {
            current: Arc::new(RwLock::new(config)),
            source,
        }
    }

    /// Load `source` and wrap the result.
    pub fn open(source: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_from(&source)?;
        Ok(Self::new(config, source))
    }

    pub fn get(&self) -> Config {
        self.current.read().clone()
    }

    /// View strings for a new host instance.
    pub fn view(&self) -> ViewConfig {
        self.current.read().view.clone()
    }

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.current.read().loader.delivery_policy()
    }

    /// Re-read the source file. On failure the current config is kept.
    ///
    /// Returns `true` if the reloaded config differs from the current one.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let config = match Config::load_from(&self.source) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.source.display(), error = %e, "Config reload failed");
                return Err(e);
            }
        };

        let mut current = self.current.write();
        let changed = *current != config;
        if changed {
            *current = config;
            tracing::info!(path = %self.source.display(), "Config reloaded");
        }
        Ok(changed)
    }

    pub fn path(&self) -> &Path {
        &self.source
    }
}
