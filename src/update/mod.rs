//! Self-update system for the plugin artifact.
//!
//! Checks a release feed for newer versions, downloads the new artifact,
//! backs up and replaces the one on disk, and asks the host for a round
//! restart so the new binary is picked up.

pub mod applier;
pub mod checker;
pub mod runner;

pub use checker::{ReleaseDescriptor, UpdateChecker, UpdateStatus, http_agent};
pub use runner::UpdateRunner;
