//! Integration tests for the `pktwatch` CLI binary.
//!
//! Argument parsing, help output and config handling run without a server;
//! packet and device commands run against a wiremock API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `pktwatch` binary with env isolation.
///
/// Clears all `PKTWATCH_*` env vars and points the config file at
/// `config` so tests never touch the user's real configuration.
fn pktwatch_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pktwatch");
    cmd.env("HOME", "/tmp/pktwatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/pktwatch-cli-test-nonexistent")
        .env("PKTWATCH_CONFIG", config)
        .env_remove("PKTWATCH_PROFILE")
        .env_remove("PKTWATCH_SERVER")
        .env_remove("PKTWATCH_TOKEN")
        .env_remove("PKTWATCH_OUTPUT")
        .env_remove("PKTWATCH_INSECURE")
        .env_remove("PKTWATCH_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn isolated() -> (tempfile::TempDir, assert_cmd::Command) {
    let dir = tempfile::tempdir().unwrap();
    let cmd = pktwatch_cmd(&dir.path().join("config.toml"));
    (dir, cmd)
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn list_body() -> Value {
    json!({
        "info": { "today": 2, "cycle": 1, "capture": 0, "error": 1 },
        "list": [
            {
                "created_at": "2403151230",
                "region": "Seoul",
                "location": "Gangnam",
                "model_name": "PM-100",
                "type": "5",
                "packet_id": 501,
                "packet": { "temp": 21 },
                "is_read": false
            },
            {
                "created_at": "2403151245",
                "region": "Seoul",
                "location": "Gangnam",
                "model_name": "PM-100",
                "type": "3",
                "packet_id": 502,
                "packet": {},
                "is_read": true
            }
        ]
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, mut cmd) = isolated();
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("packets")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pktwatch"));
}

#[test]
fn test_completions_bash() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_start_requires_end() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["packets", "count", "--start", "2024-03-01"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_date_is_rejected() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["packets", "count", "--start", "03/01/2024", "--end", "2024-03-02"])
        .assert()
        .code(2);
}

#[test]
fn test_read_requires_ids() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["packets", "read"]).assert().code(2);
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_missing_server_points_at_config_init() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["packets", "count"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_unknown_profile() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--profile", "nope", "packets", "count"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_config_show_masks_token() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "default_profile = \"prod\"\n\n\
         [profiles.prod]\n\
         server = \"https://monitor.example.com/api\"\n\
         access_token = \"s3cret\"\n",
    )
    .unwrap();

    pktwatch_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.prod]")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("s3cret").not()),
        );
}

#[test]
fn test_config_use_unknown_profile() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["config", "use", "ghost"]).assert().code(4);
}

// ── Packets against a mock server ───────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_packets_count_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .and(query_param("access_token", "t0k"))
        .and(query_param("regions[]", "Seoul"))
        .and(query_param("start", "2024-03-01"))
        .and(query_param("end", "2024-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "t0k", "-o", "plain"])
        .args(["packets", "count", "--region", "Seoul"])
        .args(["--start", "2024-03-01", "--end", "2024-03-31"])
        .assert()
        .success()
        .stdout("7\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_packets_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 12 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/packets"))
        .and(query_param("page", "2"))
        .and(query_param("row", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "t0k", "-o", "json"])
        .args(["packets", "list", "--page", "2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["count"], 12);
    assert_eq!(page["page"], 2);
    assert_eq!(page["unread"], json!([501]));
    assert_eq!(page["rows"][0]["no"], 11);
    assert_eq!(page["rows"][0]["type"], "CYCLE");
    assert_eq!(page["rows"][1]["type"], "ERROR");
    assert_eq!(page["rows"][0]["createdAt"], "2024년 03월 15일 12시 30분");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_packets_unread_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 2 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/packets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "t0k", "-o", "plain", "packets", "unread"])
        .assert()
        .success()
        .stdout("501\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_packets_read_patches_each_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/packets/501"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/packets/502"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "t0k", "packets", "read", "501", "502"])
        .assert()
        .success()
        .stderr(predicate::str::contains("501").and(predicate::str::contains("502")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_requires_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "stale", "packets", "count"])
        .assert()
        .code(3)
        .stderr(
            predicate::str::contains("Login required")
                .and(predicate::str::contains("config set-token")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_token_requires_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboards/devices/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "normal": 1, "replacement": 0, "error": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--profile", "pktwatch-cli-test-no-token", "devices", "status"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no access token"));
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_status_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboards/devices/status"))
        .and(query_param("access_token", "t0k"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "normal": 40, "replacement": 5, "error": 5 })),
        )
        .mount(&server)
        .await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "t0k", "-o", "plain", "devices", "status"])
        .assert()
        .success()
        .stdout("normal=40\nreplacement=5\nerror=5\n");
}
