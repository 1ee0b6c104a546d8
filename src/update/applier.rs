//! Artifact download, backup, and swap.
//!
//! The downloaded bytes are staged to a temp sibling and renamed into place
//! so the artifact path never holds a half-written file. The `.backup`
//! sibling (written first, when enabled) is the only recovery mechanism —
//! there is no automatic rollback.

use crate::error::{PluginError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Download a release asset as raw bytes.
///
/// # Errors
///
/// Returns [`PluginError::Update`] on transport failure, non-success status,
/// or a read error on the response body.
pub fn download_asset(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>> {
    let resp = agent
        .get(url)
        .set("User-Agent", "UpdateChecker")
        .call()
        .map_err(|e| PluginError::Update(format!("asset download failed: {e}")))?;

    let mut bytes = Vec::new();
    resp.into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| PluginError::Update(format!("asset read failed: {e}")))?;

    Ok(bytes)
}

/// Returns the backup sibling path: the artifact path with `.backup` appended.
pub fn backup_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

fn staging_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(".staged");
    PathBuf::from(name)
}

/// Back up the current artifact (when enabled) and replace it with `bytes`.
///
/// The backup is a byte-identical copy made strictly before the artifact is
/// touched, overwriting any previous backup. Installation writes to a temp
/// sibling and renames it into place.
///
/// Returns the backup path if a backup was written.
///
/// # Errors
///
/// Returns [`PluginError::Update`] if the backup copy, staging write, or
/// rename fails. A failed backup aborts before the artifact is modified.
pub fn apply(artifact: &Path, bytes: &[u8], enable_backup: bool) -> Result<Option<PathBuf>> {
    let backup = if enable_backup && artifact.exists() {
        let dest = backup_path(artifact);
        std::fs::copy(artifact, &dest).map_err(|e| {
            PluginError::Update(format!(
                "cannot back up {} to {}: {e}",
                artifact.display(),
                dest.display()
            ))
        })?;
        tracing::warn!("backup created: {}", dest.display());
        Some(dest)
    } else {
        None
    };

    install(artifact, bytes)?;
    Ok(backup)
}

fn install(artifact: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = artifact.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            PluginError::Update(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    let staged = staging_path(artifact);
    std::fs::write(&staged, bytes).map_err(|e| {
        PluginError::Update(format!("cannot stage artifact at {}: {e}", staged.display()))
    })?;

    std::fs::rename(&staged, artifact).map_err(|e| {
        let _ = std::fs::remove_file(&staged);
        PluginError::Update(format!(
            "cannot install artifact to {}: {e}",
            artifact.display()
        ))
    })?;

    tracing::info!("artifact updated at {}", artifact.display());
    Ok(())
}
