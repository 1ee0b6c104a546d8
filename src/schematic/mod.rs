//! Persistable map schematics.
//!
//! A schematic is the plugin's editable view of a map layout: doors it has
//! spawned plus state overrides for engine-owned doors, stored as YAML files
//! under the configured schematic directory.

pub mod door;

pub use door::{DamageSources, DoorPermissions, DoorRecord, DoorVariant, VanillaDoorState};

use crate::error::{PluginError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A world-space vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// The unit scale vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One editable map layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSchematic {
    /// Schematic name, used as the file stem.
    pub name: String,
    /// Doors spawned by the plugin.
    pub doors: Vec<DoorRecord>,
    /// State overrides for engine-owned doors, keyed by the engine's door name.
    pub vanilla_doors: BTreeMap<String, VanillaDoorState>,
}

impl MapSchematic {
    /// Create an empty schematic with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load a schematic from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| PluginError::Schematic(e.to_string()))
    }

    /// Save the schematic to a YAML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_yaml::to_string(self).map_err(|e| PluginError::Schematic(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
