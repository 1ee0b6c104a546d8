//! Logging setup.
//!
//! The host loader calls [`init`] once after loading the plugin; everything
//! else in the crate just emits `tracing` events into whatever subscriber is
//! installed.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber with `RUST_LOG` filtering (default `info`).
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
