//! Persistable door records.
//!
//! Two shapes: [`DoorRecord`] for doors the plugin spawns (full transform
//! plus state), and [`VanillaDoorState`] for engine-owned doors where only
//! the mutable state is persisted — position, rotation, scale, and room stay
//! with the engine and never enter the record.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// Which door prefab a spawned record uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorVariant {
    /// Light-zone door.
    #[default]
    Light,
    /// Heavy-zone door.
    Heavy,
    /// Entrance-zone door.
    Entrance,
}

/// Keycard permission flags required to open a door.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DoorPermissions(pub u16);

impl DoorPermissions {
    /// No keycard required.
    pub const NONE: Self = Self(0);
    /// Checkpoint doors.
    pub const CHECKPOINT: Self = Self(1 << 0);
    /// Exit gates.
    pub const GATE: Self = Self(1 << 1);
    /// Intercom room.
    pub const INTERCOM: Self = Self(1 << 2);
    /// Armory, tier 1.
    pub const ARMORY_LEVEL_ONE: Self = Self(1 << 3);
    /// Armory, tier 2.
    pub const ARMORY_LEVEL_TWO: Self = Self(1 << 4);
    /// Armory, tier 3.
    pub const ARMORY_LEVEL_THREE: Self = Self(1 << 5);
    /// Containment, tier 1.
    pub const CONTAINMENT_LEVEL_ONE: Self = Self(1 << 6);
    /// Containment, tier 2.
    pub const CONTAINMENT_LEVEL_TWO: Self = Self(1 << 7);
    /// Containment, tier 3.
    pub const CONTAINMENT_LEVEL_THREE: Self = Self(1 << 8);

    /// Returns `true` if every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two permission sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Damage source flags a door can be configured to ignore.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DamageSources(pub u8);

impl DamageSources {
    /// Ignores nothing.
    pub const NONE: Self = Self(0);
    /// Server console command.
    pub const SERVER_COMMAND: Self = Self(1 << 0);
    /// Gunfire.
    pub const WEAPON: Self = Self(1 << 1);
    /// Explosions.
    pub const GRENADE: Self = Self(1 << 2);

    /// Returns `true` if every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// A door spawned by the plugin: full transform plus mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorRecord {
    /// Door prefab to spawn.
    pub variant: DoorVariant,
    /// World position.
    pub position: Vector3,
    /// Euler rotation in degrees.
    pub rotation: Vector3,
    /// Scale multiplier per axis.
    pub scale: Vector3,
    /// Name of the room the door is anchored to, if any.
    pub room: Option<String>,
    /// Whether the door starts open.
    pub is_open: bool,
    /// Keycard permissions required to open it.
    pub permissions: DoorPermissions,
    /// Damage sources the door ignores.
    pub ignored_damage_sources: DamageSources,
    /// Door hit points.
    pub health: f32,
}

impl Default for DoorRecord {
    fn default() -> Self {
        Self {
            variant: DoorVariant::Light,
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            scale: Vector3::ONE,
            room: None,
            is_open: false,
            permissions: DoorPermissions::NONE,
            ignored_damage_sources: DamageSources::NONE,
            health: 100.0,
        }
    }
}

/// Mutable state of an engine-owned door. The engine owns the transform, so
/// this record carries none.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VanillaDoorState {
    /// Whether the door is open.
    pub is_open: bool,
    /// Keycard permissions required to open it.
    pub permissions: DoorPermissions,
    /// Damage sources the door ignores.
    pub ignored_damage_sources: DamageSources,
    /// Door hit points.
    pub health: f32,
}

impl VanillaDoorState {
    /// Capture the persistable state from live door attributes.
    pub fn new(
        is_open: bool,
        permissions: DoorPermissions,
        ignored_damage_sources: DamageSources,
        health: f32,
    ) -> Self {
        Self {
            is_open,
            permissions,
            ignored_damage_sources,
            health,
        }
    }
}

impl From<&DoorRecord> for VanillaDoorState {
    /// Flatten a full record down to its mutable state.
    fn from(record: &DoorRecord) -> Self {
        Self {
            is_open: record.is_open,
            permissions: record.permissions,
            ignored_damage_sources: record.ignored_damage_sources,
            health: record.health,
        }
    }
}
