//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the fixed layout and refuse an existing root
//! 2. Create the root, then every directory and file in layout order
//!    (fetching ignore lists as their turn comes)
//! 3. Initialise a repository, stage everything, commit once
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RemoteFetcher, VersionControl},
    },
    domain::{
        DomainValidator as validator, FileContent, FileToWrite, FsEntry, ProjectStructure,
        RemoteSource, SourceUrls,
        content::{INITIAL_BRANCH, INITIAL_COMMIT_MESSAGE},
    },
    error::{PyseedError, PyseedResult},
};

/// How hard to try before a fetch failure ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Extra attempts after the first one; only retryable errors use them.
    pub retries: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Knobs for a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub sources: SourceUrls,
    pub fetch_policy: FetchPolicy,
    /// Remove the root again if a run fails after creating it.
    pub rollback_on_failure: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            sources: SourceUrls::default(),
            fetch_policy: FetchPolicy::default(),
            rollback_on_failure: true,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    /// Directories created under the root, in creation order.
    pub directories: Vec<PathBuf>,
    /// Files written under the root, in creation order.
    pub files: Vec<PathBuf>,
    /// Branch holding the initial commit.
    pub branch: &'static str,
}

/// Main scaffolding service.
///
/// Orchestrates the layout materialization and repository initialisation.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    fetcher: Box<dyn RemoteFetcher>,
    vcs: Box<dyn VersionControl>,
    options: ScaffoldOptions,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pyseed_core::application::{ScaffoldOptions, ScaffoldService};
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // impl Filesystem
    ///     fetcher,    // impl RemoteFetcher
    ///     vcs,        // impl VersionControl
    ///     ScaffoldOptions::default(),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        fetcher: Box<dyn RemoteFetcher>,
        vcs: Box<dyn VersionControl>,
        options: ScaffoldOptions,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            vcs,
            options,
        }
    }

    /// The validated layout a run would create at `root`, without touching
    /// anything.
    ///
    /// Refuses an existing `root` exactly as [`Self::scaffold`] does.
    pub fn plan(&self, root: impl AsRef<Path>) -> PyseedResult<ProjectStructure> {
        let structure = ProjectStructure::python_service(root.as_ref());
        validator::validate_project_structure(&structure).map_err(PyseedError::Domain)?;

        if self.filesystem.exists(structure.root()) {
            return Err(ApplicationError::ProjectExists {
                path: structure.root().to_path_buf(),
            }
            .into());
        }

        Ok(structure)
    }

    /// Scaffold a new project at `root`.
    ///
    /// Fails without side effects if `root` already exists. Any later failure
    /// stops the run; the partial tree is rolled back when
    /// [`ScaffoldOptions::rollback_on_failure`] is set.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn scaffold(&self, root: impl AsRef<Path>) -> PyseedResult<ScaffoldReport> {
        let structure = self.plan(root)?;
        let root = structure.root();

        self.filesystem.create_dir(root)?;
        info!("Project root created");

        match self.populate(&structure) {
            Ok(report) => {
                info!(files = report.files.len(), "Scaffold completed successfully");
                Ok(report)
            }
            Err(e) => {
                if self.options.rollback_on_failure {
                    info!(error = %e, "Scaffold failed, attempting rollback");
                    self.rollback(root);
                } else {
                    info!(error = %e, "Scaffold failed, leaving partial project in place");
                }
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Everything after root creation: layout entries, then the repository.
    fn populate(&self, structure: &ProjectStructure) -> PyseedResult<ScaffoldReport> {
        let root = structure.root();
        let mut report = ScaffoldReport {
            root: root.to_path_buf(),
            directories: Vec::new(),
            files: Vec::new(),
            branch: INITIAL_BRANCH,
        };

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir(&root.join(&dir.path))?;
                    debug!(path = %dir.path, "Directory created");
                    report.directories.push(dir.path.as_path().to_path_buf());
                }
                FsEntry::File(file) => {
                    let content = self.resolve_content(file)?;
                    self.filesystem.write_file(&root.join(&file.path), &content)?;
                    debug!(path = %file.path, bytes = content.len(), "File written");
                    report.files.push(file.path.as_path().to_path_buf());
                }
            }
        }

        self.init_repository(root)?;
        Ok(report)
    }

    fn resolve_content(&self, file: &FileToWrite) -> PyseedResult<String> {
        if let FileContent::Remote(source) = file.content {
            return self.fetch_source(source);
        }
        Ok(file.content.render_local().unwrap_or_default())
    }

    fn fetch_source(&self, source: RemoteSource) -> PyseedResult<String> {
        let url = self.options.sources.url_for(source);
        info!(%source, url, "Fetching ignore list");
        fetch_with_retry(self.fetcher.as_ref(), url, self.options.fetch_policy)
    }

    /// Init, stage, commit. Each step must succeed before the next runs.
    fn init_repository(&self, root: &Path) -> PyseedResult<()> {
        self.vcs.init(root, INITIAL_BRANCH)?;
        self.vcs.stage_all(root)?;
        self.vcs.commit(root, INITIAL_COMMIT_MESSAGE)?;
        info!(branch = INITIAL_BRANCH, "Initial commit created");
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

/// Fetch `url`, re-trying retryable failures up to `policy.retries` times.
pub fn fetch_with_retry(
    fetcher: &dyn RemoteFetcher,
    url: &str,
    policy: FetchPolicy,
) -> PyseedResult<String> {
    let mut attempt = 0;
    loop {
        match fetcher.fetch(url) {
            Ok(body) => return Ok(body),
            Err(e) if e.is_retryable() && attempt < policy.retries => {
                attempt += 1;
                warn!(error = %e, attempt, url, "Fetch failed, retrying");
                std::thread::sleep(policy.backoff);
            }
            Err(e) => return Err(e),
        }
    }
}
