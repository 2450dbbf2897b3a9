pub mod common;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use project_structure::ProjectStructure;
