//! Integration tests for the `pyseed` binary.

use std::net::TcpListener;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `pyseed` running in `dir`, isolated from the user's config and `.env`.
fn pyseed(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("pyseed");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// A local URL nothing listens on.
fn dead_url(file: &str) -> String {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{port}/{file}")
}

fn git_available() -> bool {
    StdCommand::new("git").arg("--version").output().is_ok()
}

#[test]
fn help_lists_flags() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT_NAME"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--keep-partial"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_project_name_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path()).assert().code(2);
}

#[test]
fn blank_project_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path())
        .arg("  ")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn existing_directory_is_left_untouched() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("notes.txt"), "keep me").unwrap();

    pyseed(temp.path())
        .arg("demo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(root.join("notes.txt")).unwrap(),
        "keep me"
    );
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
}

#[test]
fn dry_run_prints_the_plan_and_creates_nothing() {
    let temp = TempDir::new().unwrap();

    pyseed(temp.path())
        .args(["demo", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code/__init__.py"))
        .stdout(predicate::str::contains("requirements/dev.txt"))
        .stdout(predicate::str::contains("docker/Dockerfile.dev"))
        .stdout(predicate::str::contains(".flake8"))
        .stdout(predicate::str::contains("Python.gitignore"))
        .stdout(predicate::str::contains("develop"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn no_color_convention_value_is_accepted() {
    let temp = TempDir::new().unwrap();

    pyseed(temp.path())
        .args(["demo", "--dry-run"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn dry_run_refuses_an_existing_directory() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("demo")).unwrap();

    pyseed(temp.path())
        .args(["demo", "--dry-run"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Nothing was written").not())
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn failure_is_reported_once() {
    let temp = TempDir::new().unwrap();

    let output = pyseed(temp.path())
        .arg("demo")
        .env("PYSEED_SOURCES__DOCKERIGNORE", dead_url(".dockerignore"))
        .env("PYSEED_NETWORK__RETRIES", "0")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to fetch").count(), 1, "{stderr}");
}

#[test]
fn unreachable_source_fails_and_rolls_back() {
    let temp = TempDir::new().unwrap();

    pyseed(temp.path())
        .arg("demo")
        .env("PYSEED_SOURCES__DOCKERIGNORE", dead_url(".dockerignore"))
        .env("PYSEED_NETWORK__RETRIES", "0")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(".dockerignore"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn keep_partial_leaves_files_written_before_the_failure() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");

    pyseed(temp.path())
        .args(["demo", "--keep-partial"])
        .env("PYSEED_SOURCES__DOCKERIGNORE", dead_url(".dockerignore"))
        .env("PYSEED_NETWORK__RETRIES", "0")
        .assert()
        .code(3);

    assert!(root.join("code/main.py").is_file());
    assert!(root.join("docker/Dockerfile").is_file());
    assert!(!root.join(".dockerignore").exists());
    assert!(!root.join(".flake8").exists());
    assert!(!root.join(".git").exists());
}

#[test]
fn rollback_can_be_disabled_from_the_environment() {
    let temp = TempDir::new().unwrap();

    pyseed(temp.path())
        .arg("demo")
        .env("PYSEED_SOURCES__GITIGNORE", dead_url("Python.gitignore"))
        .env("PYSEED_SOURCES__DOCKERIGNORE", dead_url(".dockerignore"))
        .env("PYSEED_NETWORK__RETRIES", "0")
        .env("PYSEED_SCAFFOLD__ROLLBACK_ON_FAILURE", "false")
        .assert()
        .failure();

    assert!(temp.path().join("demo/requirements/dev.txt").is_file());
}

#[test]
fn explicit_missing_config_file_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path())
        .args(["demo", "--config", "does-not-exist.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn invalid_config_value_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    pyseed(temp.path())
        .arg("demo")
        .env("PYSEED_NETWORK__TIMEOUT_SECS", "0")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn full_run_against_local_mirror() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.dockerignore"))
        .respond_with(ResponseTemplate::new(200).set_body_string("venv/\n.git\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Python.gitignore"))
        .respond_with(ResponseTemplate::new(200).set_body_string("__pycache__/\n"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let base = server.uri();
    let dir = temp.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        pyseed(&dir)
            .arg("demo")
            .env("PYSEED_SOURCES__DOCKERIGNORE", format!("{base}/.dockerignore"))
            .env("PYSEED_SOURCES__GITIGNORE", format!("{base}/Python.gitignore"))
            .env("GIT_CONFIG_GLOBAL", dir.join("gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "Pyseed Test")
            .env("GIT_AUTHOR_EMAIL", "test@pyseed.invalid")
            .env("GIT_COMMITTER_NAME", "Pyseed Test")
            .env("GIT_COMMITTER_EMAIL", "test@pyseed.invalid")
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("develop"))
        .stdout(predicate::str::contains("Next steps"));

    let root = temp.path().join("demo");
    assert_eq!(
        std::fs::read_to_string(root.join(".dockerignore")).unwrap(),
        "venv/\n.git\n"
    );
    assert_eq!(
        std::fs::read_to_string(root.join(".gitignore")).unwrap(),
        "__pycache__/\n"
    );
    assert_eq!(std::fs::read(root.join("code/main.py")).unwrap().len(), 0);

    let files = WalkDir::new(&root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count();
    assert_eq!(files, 9);
}
