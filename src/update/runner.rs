//! Update pass orchestration.
//!
//! One pass = check the feed, optionally download and swap the artifact,
//! then ask the host to restart the round. Passes triggered by the host's
//! round-waiting event run on the blocking pool behind a single-flight
//! guard, and the spawn returns an explicit handle the host can await.

use crate::config::UpdaterConfig;
use crate::error::{PluginError, Result};
use crate::host::{HostConsole, ROUND_RESTART_COMMAND};
use crate::update::applier;
use crate::update::checker::{UpdateChecker, UpdateStatus, http_agent};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Drives update passes for one plugin artifact.
pub struct UpdateRunner<H> {
    checker: UpdateChecker,
    artifact_path: PathBuf,
    enabled: bool,
    auto_apply: bool,
    enable_backup: bool,
    host: Arc<H>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the single-flight flag when the pass ends, panicking or not.
struct InFlightReset(Arc<AtomicBool>);

impl Drop for InFlightReset {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// Derived Clone would demand H: Clone; the host only ever lives behind the Arc.
impl<H> Clone for UpdateRunner<H> {
    fn clone(&self) -> Self {
        Self {
            checker: self.checker.clone(),
            artifact_path: self.artifact_path.clone(),
            enabled: self.enabled,
            auto_apply: self.auto_apply,
            enable_backup: self.enable_backup,
            host: Arc::clone(&self.host),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<H: HostConsole + Send + Sync + 'static> UpdateRunner<H> {
    /// Build a runner from the updater config and a host console.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Config`] when `artifact_path` is unset, since
    /// a pass would have nothing to update.
    pub fn from_config(config: &UpdaterConfig, host: Arc<H>) -> Result<Self> {
        let artifact_path = config.artifact_path.clone().ok_or_else(|| {
            PluginError::Config("updater.artifact_path is not set".to_owned())
        })?;

        let checker = UpdateChecker::new(
            http_agent(),
            config.release_feed_url.clone(),
            config.running_version(),
        );

        Ok(Self {
            checker,
            artifact_path,
            enabled: config.enabled,
            auto_apply: config.auto_apply,
            enable_backup: config.enable_backup,
            host,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Build an enabled runner from an already-constructed checker (tests
    /// point the checker at a mock feed).
    pub fn new(
        checker: UpdateChecker,
        artifact_path: PathBuf,
        auto_apply: bool,
        enable_backup: bool,
        host: Arc<H>,
    ) -> Self {
        Self {
            checker,
            artifact_path,
            enabled: true,
            auto_apply,
            enable_backup,
            host,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Round-waiting event handler: spawn one update pass on the blocking
    /// pool and return its handle.
    ///
    /// Returns `None` when the updater is disabled by config, or when a pass
    /// is already in flight — overlapping events must not race on the
    /// artifact file.
    pub fn on_round_waiting(&self) -> Option<JoinHandle<()>> {
        if !self.enabled {
            tracing::info!("updater is disabled, skipping update check");
            return None;
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("update pass already in flight, skipping this event");
            return None;
        }

        tracing::info!("checking for updates...");
        let runner = self.clone();
        Some(tokio::task::spawn_blocking(move || {
            let _reset = InFlightReset(Arc::clone(&runner.in_flight));
            runner.run_once(runner.auto_apply);
        }))
    }

    /// Run one full update pass synchronously.
    ///
    /// Every failure is logged and terminates the pass; nothing propagates
    /// to the caller.
    pub fn run_once(&self, auto_apply: bool) {
        let release = match self.checker.check() {
            Ok(UpdateStatus::UpToDate) => {
                tracing::info!("running the latest version");
                return;
            }
            Ok(UpdateStatus::Available(release)) => release,
            Err(e) => {
                tracing::error!("update check failed: {e}");
                return;
            }
        };

        tracing::warn!(
            "new version available: {} (current: {})",
            release.tag,
            self.checker.current_version()
        );

        if !auto_apply {
            tracing::warn!("auto-apply is disabled, download the update manually");
            return;
        }

        tracing::info!("downloading and applying the update...");
        let bytes = match applier::download_asset(self.checker.agent(), &release.download_url) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };

        if let Err(e) = applier::apply(&self.artifact_path, &bytes, self.enable_backup) {
            tracing::error!("{e}");
            return;
        }

        tracing::info!("update applied, requesting round restart");
        match self.host.execute_command(ROUND_RESTART_COMMAND) {
            Ok(()) => tracing::info!("round restart initiated"),
            Err(e) => tracing::error!("round restart request failed: {e}"),
        }
    }
}
