//! pyseed Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the pyseed
//! Python service scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pyseed-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Fetcher, VCS)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pyseed-adapters (Infrastructure)     │
//! │  (LocalFilesystem, HttpFetcher, GitCli) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectStructure, Variant, content)    │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pyseed_core::application::{ScaffoldOptions, ScaffoldService};
//!
//! let service = ScaffoldService::new(filesystem, fetcher, vcs, ScaffoldOptions::default());
//! let report = service.scaffold("my-service")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FetchPolicy, ScaffoldOptions, ScaffoldReport, ScaffoldService,
        ports::{Filesystem, RemoteFetcher, VersionControl},
    };
    pub use crate::domain::{
        FileContent, FsEntry, ProjectStructure, RelativePath, RemoteSource, SourceUrls, Variant,
    };
    pub use crate::error::{PyseedError, PyseedResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
