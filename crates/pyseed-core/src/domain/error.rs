// ============================================================================
// domain/error.rs - LAYOUT INVARIANT VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// The only domain rules are the layout invariants, so every variant here
/// means the built-in structure table is inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Project structure is empty")]
    EmptyStructure,

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("'{path}' is created before its parent directory '{parent}'")]
    ParentNotDeclared { path: String, parent: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("Layout entries must be relative to the project root: {path}"),
                "This is a bug in pyseed, please report it".into(),
            ],
            _ => vec![
                "The built-in project layout is inconsistent".into(),
                "This is a bug in pyseed, please report it".into(),
            ],
        }
    }
}
