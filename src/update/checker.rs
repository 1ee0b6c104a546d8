//! Release feed checker.
//!
//! Queries the release feed for the latest published version, compares it
//! against the running version, and reports whether an update is available.
//! Version-parse trouble on either side fails closed as "up to date".

use crate::error::{PluginError, Result};
use crate::version::is_newer;
use serde::Deserialize;
use std::time::Duration;

/// The latest release as published by the feed. Ephemeral — lives only for
/// the duration of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    /// Version tag, e.g. `3.3.0`.
    pub tag: String,
    /// Download URL of the first release asset.
    pub download_url: String,
}

/// Outcome of one version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The running version is current (or the comparison failed closed).
    UpToDate,
    /// A newer release is available.
    Available(ReleaseDescriptor),
}

#[derive(Debug, Deserialize)]
struct ReleaseWire {
    tag_name: Option<String>,
    assets: Option<Vec<AssetWire>>,
}

#[derive(Debug, Deserialize)]
struct AssetWire {
    browser_download_url: Option<String>,
}

/// Build the HTTP agent used for feed queries and asset downloads.
///
/// Connect/read deadlines are explicit; asset downloads get a generous read
/// timeout since release binaries can be large.
pub fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(120))
        .build()
}

/// Strip at most one leading `v`/`V` from a release tag. Repeated prefixes
/// (`vv3.3.0`) are left for the version parse to reject.
fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
}

fn parse_release(body: &str) -> Result<ReleaseDescriptor> {
    let wire: ReleaseWire =
        serde_json::from_str(body).map_err(|e| PluginError::Parse(e.to_string()))?;

    let tag = wire
        .tag_name
        .filter(|t| !t.is_empty())
        .ok_or_else(|| PluginError::Parse("release is missing `tag_name`".to_owned()))?;

    let download_url = wire
        .assets
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|a| a.browser_download_url)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            PluginError::Parse("release has no asset with `browser_download_url`".to_owned())
        })?;

    Ok(ReleaseDescriptor { tag, download_url })
}

/// Client for one release feed, carrying the running version to compare
/// against. The agent is injected so callers share one client and tests can
/// point it at a mock server.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    agent: ureq::Agent,
    feed_url: String,
    current_version: String,
}

impl UpdateChecker {
    /// Create a checker for `feed_url`, comparing against `current_version`.
    pub fn new(
        agent: ureq::Agent,
        feed_url: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            feed_url: feed_url.into(),
            current_version: current_version.into(),
        }
    }

    /// The shared HTTP agent (also used for asset downloads).
    pub fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    /// The running version this checker compares against.
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Fetch and parse the latest release descriptor from the feed.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Feed`] on transport failure or non-success
    /// status, [`PluginError::Parse`] on a malformed payload.
    pub fn fetch_latest(&self) -> Result<ReleaseDescriptor> {
        let resp = self
            .agent
            .get(&self.feed_url)
            .set("User-Agent", "UpdateChecker")
            .call()
            .map_err(|e| PluginError::Feed(e.to_string()))?;

        let body = resp
            .into_string()
            .map_err(|e| PluginError::Feed(e.to_string()))?;

        parse_release(&body)
    }

    /// Fetch the latest release and compare it against the running version.
    ///
    /// Feeds commonly prefix tags with `v`; one such prefix is stripped
    /// before the version parse. An unparsable version on either side fails
    /// closed to [`UpdateStatus::UpToDate`].
    ///
    /// # Errors
    ///
    /// Returns an error only for feed transport/status or payload parse
    /// failures, never for version comparison trouble.
    pub fn check(&self) -> Result<UpdateStatus> {
        let release = self.fetch_latest()?;
        let remote = normalize_tag(&release.tag);

        if is_newer(&self.current_version, remote) {
            Ok(UpdateStatus::Available(release))
        } else {
            Ok(UpdateStatus::UpToDate)
        }
    }
}
