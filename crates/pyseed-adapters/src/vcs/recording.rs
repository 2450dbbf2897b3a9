//! Recording version-control adapter for testing.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use pyseed_core::{
    application::{ApplicationError, ports::VersionControl},
    error::{PyseedError, PyseedResult},
};

/// One recorded version-control call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Init { root: PathBuf, branch: String },
    StageAll { root: PathBuf },
    Commit { root: PathBuf, message: String },
}

/// The step a [`RecordingVcs`] can be told to fail at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsStep {
    Init,
    StageAll,
    Commit,
}

impl VcsStep {
    fn command(self) -> &'static str {
        match self {
            Self::Init => "git init",
            Self::StageAll => "git add .",
            Self::Commit => "git commit",
        }
    }
}

/// Records calls instead of running anything.
///
/// Clones share the call log. A failing step is still recorded before it
/// returns its error.
#[derive(Debug, Clone, Default)]
pub struct RecordingVcs {
    calls: Arc<Mutex<Vec<VcsCall>>>,
    fail_at: Option<VcsStep>,
}

impl RecordingVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `step` exit non-zero.
    pub fn failing_at(mut self, step: VcsStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().map(|c| c.to_vec()).unwrap_or_default()
    }

    fn record(&self, step: VcsStep, call: VcsCall) -> PyseedResult<()> {
        self.calls
            .lock()
            .map_err(|_| PyseedError::Internal {
                message: "recording vcs lock poisoned".into(),
            })?
            .push(call);

        if self.fail_at == Some(step) {
            return Err(ApplicationError::CommandFailed {
                command: step.command().to_string(),
                status: "exit status: 128".into(),
                stderr: "fatal: simulated failure".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl VersionControl for RecordingVcs {
    fn init(&self, root: &Path, branch: &str) -> PyseedResult<()> {
        self.record(
            VcsStep::Init,
            VcsCall::Init {
                root: root.to_path_buf(),
                branch: branch.to_string(),
            },
        )
    }

    fn stage_all(&self, root: &Path) -> PyseedResult<()> {
        self.record(
            VcsStep::StageAll,
            VcsCall::StageAll {
                root: root.to_path_buf(),
            },
        )
    }

    fn commit(&self, root: &Path, message: &str) -> PyseedResult<()> {
        self.record(
            VcsStep::Commit,
            VcsCall::Commit {
                root: root.to_path_buf(),
                message: message.to_string(),
            },
        )
    }
}
