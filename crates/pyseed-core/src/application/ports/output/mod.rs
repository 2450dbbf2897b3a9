//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pyseed-adapters` crate provides implementations.

use crate::error::PyseedResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pyseed_adapters::filesystem::LocalFilesystem` (production)
/// - `pyseed_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a single directory. Fails if it already exists or its parent
    /// does not.
    fn create_dir(&self, path: &Path) -> PyseedResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PyseedResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PyseedResult<()>;
}

/// Port for retrieving a remote text document.
///
/// Implemented by:
/// - `pyseed_adapters::fetcher::HttpFetcher` (production)
/// - `pyseed_adapters::fetcher::StaticFetcher` (testing)
pub trait RemoteFetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    ///
    /// One call issues one request; retrying is the caller's decision, guided
    /// by [`crate::error::PyseedError::is_retryable`].
    fn fetch(&self, url: &str) -> PyseedResult<String>;
}

/// Port for the version-control system wrapped around a fresh scaffold.
///
/// Implemented by:
/// - `pyseed_adapters::vcs::GitCli` (production)
/// - `pyseed_adapters::vcs::RecordingVcs` (testing)
pub trait VersionControl: Send + Sync {
    /// Create a repository at `root` whose first branch is `branch`.
    fn init(&self, root: &Path, branch: &str) -> PyseedResult<()>;

    /// Stage every file under `root`.
    fn stage_all(&self, root: &Path) -> PyseedResult<()>;

    /// Commit the staged snapshot.
    fn commit(&self, root: &Path, message: &str) -> PyseedResult<()>;
}
