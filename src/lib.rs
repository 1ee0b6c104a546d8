//! mapwright: host-independent core of a game-server map-editing plugin.
//!
//! The crate has two halves:
//! - **Schematics**: persistable map-layout records (spawned doors, state
//!   overrides for engine-owned doors) stored as YAML files.
//! - **Self-update**: a release-feed checker and artifact swapper that runs
//!   once per round-waiting event, backs up and replaces the plugin binary,
//!   and asks the host for a round restart so the new binary takes effect.
//!
//! The host runtime (object model, physics, round lifecycle) stays on the
//! other side of the narrow [`host::HostConsole`] boundary.

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod schematic;
pub mod update;
pub mod version;

pub use config::{PluginConfig, SchematicConfig, UpdaterConfig};
pub use error::{PluginError, Result};
pub use host::{HostConsole, ROUND_RESTART_COMMAND};
pub use schematic::{MapSchematic, Vector3};
pub use update::{ReleaseDescriptor, UpdateChecker, UpdateRunner, UpdateStatus};
pub use version::{VersionNumber, is_newer};
