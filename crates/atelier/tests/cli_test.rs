//! Integration tests for the `atelier` CLI binary.
//!
//! Argument parsing, help output and config handling run against an
//! isolated home directory. Backend-bound commands talk to a wiremock
//! server through `--api-url` with a pre-seeded session file.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `atelier` binary with env isolation.
///
/// Clears every `ATELIER_*` variable and points config and data
/// directories at `home` so tests never touch a real configuration.
fn atelier_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("atelier");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("ATELIER_PROFILE")
        .env_remove("ATELIER_API_URL")
        .env_remove("ATELIER_SESSION_FILE")
        .env_remove("ATELIER_OUTPUT")
        .env_remove("ATELIER_INSECURE")
        .env_remove("ATELIER_TIMEOUT")
        .env_remove("ATELIER_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write a session file for an already-logged-in user.
fn seed_session(dir: &Path, is_admin: bool) -> PathBuf {
    let path = dir.join("session.json");
    let session = json!({
        "access_token": "acc-token",
        "refresh_token": "ref-token",
        "current_user": {
            "id": 1,
            "email": "admin@agency.test",
            "username": "admin",
            "is_admin": is_admin,
        }
    });
    std::fs::write(&path, serde_json::to_string_pretty(&session).unwrap()).unwrap();
    path
}

fn write_config(home: &Path, body: &str) -> PathBuf {
    let dir = home.join("config").join("atelier");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

/// Run a prepared command off the async runtime so the mock server keeps
/// serving while the binary blocks on it.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = atelier_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_collections() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("blogs")
            .and(predicate::str::contains("services"))
            .and(predicate::str::contains("enquiries"))
            .and(predicate::str::contains("applications")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("atelier"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("atelier"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path())
        .arg("invoices")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_review_rating_out_of_range() {
    let home = TempDir::new().unwrap();
    let output = atelier_cmd(home.path())
        .args(["reviews", "create", "--name", "Ada", "--rating", "7", "--text", "Great"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_blog_status_value_checked_by_parser() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path())
        .args(["blogs", "create", "--title", "Hello", "--status", "archived"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("archived"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_backend_command_without_config() {
    let home = TempDir::new().unwrap();
    let output = atelier_cmd(home.path())
        .args(["blogs", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No backend configured"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "default_profile = \"default\"\n\n[profiles.default]\napi_url = \"http://localhost:8000\"\n",
    );
    let output = atelier_cmd(home.path())
        .args(["--profile", "staging", "blogs", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("staging"));
}

#[test]
fn test_config_profiles_marks_default() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "default_profile = \"prod\"\n\n\
         [profiles.prod]\napi_url = \"https://agency.test\"\n\n\
         [profiles.local]\napi_url = \"http://localhost:8000\"\n",
    );
    atelier_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("prod *")
                .and(predicate::str::contains("local\thttp://localhost:8000")),
        );
}

#[test]
fn test_config_use_switches_default() {
    let home = TempDir::new().unwrap();
    let config = write_config(
        home.path(),
        "default_profile = \"prod\"\n\n\
         [profiles.prod]\napi_url = \"https://agency.test\"\n\n\
         [profiles.local]\napi_url = \"http://localhost:8000\"\n",
    );
    atelier_cmd(home.path())
        .args(["config", "use", "local"])
        .assert()
        .success();

    let written = std::fs::read_to_string(config).unwrap();
    assert!(written.contains("default_profile = \"local\""));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = TempDir::new().unwrap();
    atelier_cmd(home.path())
        .args(["config", "use", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_config_show_redacts_password() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "[profiles.default]\napi_url = \"http://localhost:8000\"\npassword = \"hunter2\"\n",
    );
    atelier_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****").and(predicate::str::contains("hunter2").not()));
}

#[test]
fn test_malformed_config_is_never_overwritten() {
    let home = TempDir::new().unwrap();
    let body = "default_profile = \"prod\"\n\n\
         [profiles.prod]\napi_url = \"https://agency.test\"\ntimeout = \"abc\"\n\n\
         [profiles.local]\napi_url = \"http://localhost:8000\"\n";
    let config = write_config(home.path(), body);

    for args in [&["config", "use", "local"][..], &["config", "set", "email", "a@b.test"][..]] {
        let output = atelier_cmd(home.path()).args(args).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
        assert!(combined_output(&output).contains("config loading failed"));
    }
    assert_eq!(std::fs::read_to_string(config).unwrap(), body);
}

#[test]
fn test_malformed_config_reported_by_backend_commands() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "[profiles.default]\napi_url = \"http://localhost:8000\"\ntimeout = \"abc\"\n",
    );
    let output = atelier_cmd(home.path())
        .args(["blogs", "list"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("config loading failed"));
    assert!(!text.contains("No backend configured"));
}

// ── Backend-bound commands ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_command_requires_login() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "blogs", "list"])
        .env("ATELIER_SESSION_FILE", home.path().join("missing.json"));
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not logged in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_admin_session_is_refused() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), false);

    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "dashboard"])
        .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(5));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blogs_list_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/blogs/"))
        .and(header("authorization", "Bearer acc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Launch week", "author": "Mira", "status": "published"},
            {"id": 2, "title": "Brand refresh", "author": "Jon", "status": "draft"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), true);
    let mut cmd = atelier_cmd(home.path());
    cmd.args([
        "--api-url",
        &server.uri(),
        "-o",
        "json",
        "blogs",
        "list",
        "--status",
        "draft",
    ])
    .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Brand refresh"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_refuses_non_interactive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), true);
    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "enquiries", "delete", "4"])
        .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/enquiries/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), true);
    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "--yes", "enquiries", "delete", "4"])
        .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Deleted enquiry 4"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_record_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/jobs/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), true);
    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "jobs", "get", "99"])
        .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_public_services_need_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "Branding", "order": 2, "status": "active"},
            {"id": 1, "name": "SEO", "order": 1, "status": "active"},
            {"id": 3, "name": "Retired", "order": 0, "status": "inactive"}
        ])))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "-o", "plain", "site", "services"])
        .env("ATELIER_SESSION_FILE", home.path().join("none.json"));
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "SEO\nBranding\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .respond_with(ResponseTemplate::new(205))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let session = seed_session(home.path(), true);
    let mut cmd = atelier_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "auth", "logout"])
        .env("ATELIER_SESSION_FILE", &session);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(!session.exists());
}
