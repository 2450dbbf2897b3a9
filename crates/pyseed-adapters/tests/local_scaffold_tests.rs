//! End-to-end scaffold on the real filesystem with the real `git`.
//!
//! Skipped when `git` is not installed.

use std::path::Path;
use std::process::Command;

use pyseed_adapters::{GitCli, LocalFilesystem, StaticFetcher};
use pyseed_core::application::ApplicationError;
use pyseed_core::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

fn git_available() -> bool {
    if which::which("git").is_ok() {
        return true;
    }
    eprintln!("git not found on PATH, skipping");
    false
}

/// `git` with a throwaway identity that ignores the user's global config.
fn isolated_git(home: &Path) -> GitCli {
    GitCli::new()
        .with_env("GIT_CONFIG_GLOBAL", home.join("gitconfig"))
        .with_env("GIT_CONFIG_NOSYSTEM", "1")
        .with_env("GIT_AUTHOR_NAME", "Pyseed Test")
        .with_env("GIT_AUTHOR_EMAIL", "test@pyseed.invalid")
        .with_env("GIT_COMMITTER_NAME", "Pyseed Test")
        .with_env("GIT_COMMITTER_EMAIL", "test@pyseed.invalid")
}

fn git_output(root: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn service(home: &Path) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(StaticFetcher::upstream("venv/\n", "__pycache__/\n")),
        Box::new(isolated_git(home)),
        ScaffoldOptions::default(),
    )
}

#[test]
fn scaffold_produces_a_single_commit_on_develop() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");

    service(temp.path()).scaffold(&root).unwrap();

    assert_eq!(git_output(&root, &["rev-list", "--count", "HEAD"]), "1");
    assert_eq!(git_output(&root, &["branch", "--show-current"]), "develop");
    assert_eq!(git_output(&root, &["log", "-1", "--format=%s"]), "initial commit");
    assert_eq!(git_output(&root, &["status", "--porcelain"]), "");

    let mut tracked: Vec<String> = git_output(&root, &["ls-files"])
        .lines()
        .map(str::to_string)
        .collect();
    tracked.sort();
    assert_eq!(
        tracked,
        vec![
            ".dockerignore",
            ".flake8",
            ".gitignore",
            "code/__init__.py",
            "code/main.py",
            "docker/Dockerfile",
            "docker/Dockerfile.dev",
            "requirements/base.txt",
            "requirements/dev.txt",
        ]
    );
}

#[test]
fn only_the_fixed_layout_and_git_metadata_are_created() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");

    service(temp.path()).scaffold(&root).unwrap();

    let mut created: Vec<String> = WalkDir::new(&root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    created.sort();

    assert_eq!(
        created,
        vec![
            ".dockerignore",
            ".flake8",
            ".gitignore",
            "code",
            "code/__init__.py",
            "code/main.py",
            "docker",
            "docker/Dockerfile",
            "docker/Dockerfile.dev",
            "requirements",
            "requirements/base.txt",
            "requirements/dev.txt",
        ]
    );
    assert!(root.join(".git").is_dir());
    assert_eq!(
        std::fs::read_to_string(root.join(".gitignore")).unwrap(),
        "__pycache__/\n"
    );
}

#[test]
fn existing_directory_is_not_modified() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("keep.txt"), "precious").unwrap();

    let err = service(temp.path()).scaffold(&root).unwrap_err();

    assert!(matches!(
        err,
        PyseedError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(
        std::fs::read_to_string(root.join("keep.txt")).unwrap(),
        "precious"
    );
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
}

#[test]
fn git_failure_surfaces_exit_status_and_stderr() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    let not_a_repo = temp.path().join("plain");
    std::fs::create_dir(&not_a_repo).unwrap();

    let err = isolated_git(temp.path())
        .with_env("GIT_CEILING_DIRECTORIES", temp.path())
        .commit(&not_a_repo, "initial commit")
        .unwrap_err();

    match err {
        PyseedError::Application(ApplicationError::CommandFailed {
            command, stderr, ..
        }) => {
            assert!(command.contains("commit"));
            assert!(!stderr.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
