//! Git adapter driving the `git` executable.

use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
    process::Command,
};

use pyseed_core::{
    application::{ApplicationError, ports::VersionControl},
    error::{PyseedError, PyseedResult},
};
use tracing::{debug, instrument};

/// Runs `git` as a child process.
///
/// The executable is resolved on `PATH` for every call, so a missing `git`
/// surfaces as [`ApplicationError::CommandNotFound`] instead of a spawn error.
#[derive(Debug, Clone)]
pub struct GitCli {
    executable: OsString,
    envs: Vec<(OsString, OsString)>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_executable("git")
    }

    /// Use a specific executable name or path instead of `git`.
    pub fn with_executable(executable: impl Into<OsString>) -> Self {
        Self {
            executable: executable.into(),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable on every spawned `git` process.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn program_name(&self) -> String {
        self.executable.to_string_lossy().into_owned()
    }

    fn resolve(&self) -> PyseedResult<PathBuf> {
        which::which(&self.executable).map_err(|_| {
            ApplicationError::CommandNotFound {
                program: self.program_name(),
            }
            .into()
        })
    }

    fn run(&self, args: &[&OsStr]) -> PyseedResult<()> {
        let program = self.resolve()?;
        let command = self.describe(args);
        debug!(%command, "Running");

        let output = Command::new(&program)
            .args(args)
            .envs(self.envs.iter().cloned())
            .output()
            .map_err(|e| self.spawn_error(&command, e))?;

        if !output.status.success() {
            return Err(ApplicationError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn describe(&self, args: &[&OsStr]) -> String {
        let mut parts = vec![self.program_name()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    fn spawn_error(&self, command: &str, e: io::Error) -> PyseedError {
        if e.kind() == io::ErrorKind::NotFound {
            ApplicationError::CommandNotFound {
                program: self.program_name(),
            }
            .into()
        } else {
            ApplicationError::CommandFailed {
                command: command.to_string(),
                status: "not started".into(),
                stderr: e.to_string(),
            }
            .into()
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    #[instrument(skip(self))]
    fn init(&self, root: &Path, branch: &str) -> PyseedResult<()> {
        self.run(&[
            OsStr::new("init"),
            OsStr::new("--initial-branch"),
            OsStr::new(branch),
            OsStr::new("--"),
            root.as_os_str(),
        ])
    }

    #[instrument(skip(self))]
    fn stage_all(&self, root: &Path) -> PyseedResult<()> {
        self.run(&[
            OsStr::new("-C"),
            root.as_os_str(),
            OsStr::new("add"),
            OsStr::new("."),
        ])
    }

    #[instrument(skip(self))]
    fn commit(&self, root: &Path, message: &str) -> PyseedResult<()> {
        self.run(&[
            OsStr::new("-C"),
            root.as_os_str(),
            OsStr::new("commit"),
            OsStr::new("-m"),
            OsStr::new(message),
        ])
    }
}
