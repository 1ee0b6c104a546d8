//! End-to-end update pass tests against a mock release feed.
//!
//! Each test stands up a wiremock server playing both the release feed and
//! the asset host, points an `UpdateRunner` at it with a temp-dir artifact,
//! and asserts on the resulting filesystem state and host commands.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mapwright::host::{HostConsole, ROUND_RESTART_COMMAND};
use mapwright::update::{UpdateChecker, UpdateRunner, http_agent};
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Host console test double that records every command it receives.
#[derive(Default)]
struct RecordingConsole {
    commands: Mutex<Vec<String>>,
}

impl RecordingConsole {
    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl HostConsole for RecordingConsole {
    fn execute_command(&self, command: &str) -> mapwright::Result<()> {
        self.commands.lock().unwrap().push(command.to_owned());
        Ok(())
    }
}

async fn mount_feed(server: &MockServer, tag: &str) {
    let body = json!({
        "tag_name": tag,
        "assets": [
            { "browser_download_url": format!("{}/download/mapwright.so", server.uri()) }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .and(header("user-agent", "UpdateChecker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_asset(server: &MockServer, bytes: &'static [u8], expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/download/mapwright.so"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn runner_for(
    server: &MockServer,
    artifact: PathBuf,
    current_version: &str,
    auto_apply: bool,
    enable_backup: bool,
    console: Arc<RecordingConsole>,
) -> UpdateRunner<RecordingConsole> {
    let checker = UpdateChecker::new(
        http_agent(),
        format!("{}/releases/latest", server.uri()),
        current_version,
    );
    UpdateRunner::new(checker, artifact, auto_apply, enable_backup, console)
}

#[tokio::test]
async fn auto_apply_backs_up_swaps_and_restarts() {
    let server = MockServer::start().await;
    mount_feed(&server, "3.3.0").await;
    mount_asset(&server, b"new-binary-bytes", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    let handle = runner.on_round_waiting().expect("pass should spawn");
    handle.await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"new-binary-bytes");
    let backup = dir.path().join("mapwright.so.backup");
    assert_eq!(std::fs::read(&backup).unwrap(), b"old-binary-bytes");
    assert_eq!(console.commands(), vec![ROUND_RESTART_COMMAND.to_owned()]);
}

#[tokio::test]
async fn manual_mode_only_logs_availability() {
    let server = MockServer::start().await;
    mount_feed(&server, "3.3.0").await;
    mount_asset(&server, b"new-binary-bytes", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        false,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    // No download, no write, no backup, no restart.
    assert_eq!(std::fs::read(&artifact).unwrap(), b"old-binary-bytes");
    assert!(!dir.path().join("mapwright.so.backup").exists());
    assert!(console.commands().is_empty());
}

#[tokio::test]
async fn up_to_date_touches_nothing() {
    let server = MockServer::start().await;
    mount_feed(&server, "3.2.0").await;
    mount_asset(&server, b"new-binary-bytes", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"old-binary-bytes");
    assert!(console.commands().is_empty());
}

#[tokio::test]
async fn backups_disabled_never_writes_backup() {
    let server = MockServer::start().await;
    mount_feed(&server, "3.3.0").await;
    mount_asset(&server, b"new-binary-bytes", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        false,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"new-binary-bytes");
    assert!(!dir.path().join("mapwright.so.backup").exists());
    assert_eq!(console.commands(), vec![ROUND_RESTART_COMMAND.to_owned()]);
}

#[tokio::test]
async fn malformed_payload_aborts_before_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [{ "browser_download_url": format!("{}/download/mapwright.so", server.uri()) }]
        })))
        .mount(&server)
        .await;
    mount_asset(&server, b"new-binary-bytes", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"old-binary-bytes");
    assert!(console.commands().is_empty());
}

#[tokio::test]
async fn feed_failure_aborts_gracefully() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"old-binary-bytes");
    assert!(console.commands().is_empty());
}

#[tokio::test]
async fn unparsable_remote_tag_fails_closed() {
    let server = MockServer::start().await;
    mount_feed(&server, "latest-and-greatest").await;
    mount_asset(&server, b"new-binary-bytes", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");
    std::fs::write(&artifact, b"old-binary-bytes").unwrap();

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"old-binary-bytes");
    assert!(console.commands().is_empty());
}

#[tokio::test]
async fn v_prefixed_tag_is_accepted() {
    let server = MockServer::start().await;
    mount_feed(&server, "v3.3.0").await;
    mount_asset(&server, b"new-binary-bytes", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact.clone(),
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    runner.on_round_waiting().expect("pass should spawn").await.unwrap();

    assert_eq!(std::fs::read(&artifact).unwrap(), b"new-binary-bytes");
}

#[tokio::test]
async fn overlapping_events_run_a_single_pass() {
    let server = MockServer::start().await;
    let body = json!({
        "tag_name": "3.2.0",
        "assets": [
            { "browser_download_url": format!("{}/download/mapwright.so", server.uri()) }
        ]
    });
    // Slow feed keeps the first pass in flight while the second event fires.
    // Two hits at most: the skipped event must not reach the feed.
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1..=2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("mapwright.so");

    let console = Arc::new(RecordingConsole::default());
    let runner = runner_for(
        &server,
        artifact,
        "3.2.0",
        true,
        true,
        Arc::clone(&console),
    );

    let first = runner.on_round_waiting().expect("first event spawns");
    assert!(
        runner.on_round_waiting().is_none(),
        "second event must be skipped while the first is in flight"
    );

    first.await.unwrap();

    // The guard resets once the pass completes.
    let third = runner.on_round_waiting().expect("guard resets after completion");
    third.await.unwrap();
}
