//! # crudgen core
//!
//! Core types, naming rules and error handling for crudgen.
//!
//! This crate provides the building blocks shared by the schema model, the
//! renderer and the command line:
//!
//! - **Types**: `ArtifactKind`, the four generated class kinds
//! - **Naming**: snake_case / PascalCase / camelCase / kebab-case transforms
//! - **PHP literals**: quoting helpers used by every generated artifact
//! - **Traits**: `Validatable`
//! - **Errors**: `CrudgenError` and `CrudgenResult`
//!

pub mod error;
pub mod naming;
pub mod php;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{CrudgenError, CrudgenResult};
pub use traits::Validatable;
pub use types::ArtifactKind;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
