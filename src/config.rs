//! Configuration types for the plugin.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Self-update settings.
    pub updater: UpdaterConfig,
    /// Map schematic storage settings.
    pub schematics: SchematicConfig,
}

/// Self-update configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Whether the update check runs at all on the round-waiting event.
    pub enabled: bool,
    /// Apply updates automatically. When `false`, availability is only logged
    /// and the operator must update manually.
    pub auto_apply: bool,
    /// Copy the current artifact to `<artifact>.backup` before overwriting it.
    pub enable_backup: bool,
    /// Release feed endpoint publishing the latest tag and download link.
    pub release_feed_url: String,
    /// Path to the plugin artifact on disk. Must be set by the host loader
    /// before auto-apply can run; there is no portable default.
    pub artifact_path: Option<PathBuf>,
    /// Running plugin version. `None` means the crate's own version.
    pub current_version: Option<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_apply: false,
            enable_backup: true,
            release_feed_url:
                "https://api.github.com/repos/mapwright/mapwright/releases/latest".to_owned(),
            artifact_path: None,
            current_version: None,
        }
    }
}

impl UpdaterConfig {
    /// Returns the running version string, defaulting to the crate version.
    pub fn running_version(&self) -> String {
        self.current_version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned())
    }
}

/// Map schematic storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchematicConfig {
    /// Directory where schematic YAML files are stored.
    pub root_dir: PathBuf,
}

impl Default for SchematicConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("schematics"),
        }
    }
}

impl PluginConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::PluginError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PluginError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
