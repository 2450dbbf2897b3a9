// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pyseed.
//!
//! This module contains pure scaffold logic with ZERO I/O.
//! Filesystem writes, network fetches, and git invocations are handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable content**: All fixed text is `&'static str`
//!
// Public API - what the world sees
pub mod content;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    project_structure::{DirectoryToCreate, FileContent, FileToWrite, FsEntry, ProjectStructure},
};

pub use error::DomainError;

pub use value_objects::{RemoteSource, SourceUrls, Variant};

pub use validation::DomainValidator;
