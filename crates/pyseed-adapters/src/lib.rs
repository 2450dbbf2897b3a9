//! Infrastructure adapters for pyseed.
//!
//! This crate implements the ports defined in `pyseed-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod vcs;

// Re-export commonly used adapters
pub use fetcher::{HttpFetcher, HttpSettings, StaticFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use vcs::{GitCli, RecordingVcs, VcsCall, VcsStep};
