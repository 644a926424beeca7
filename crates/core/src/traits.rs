//! Core traits for crudgen
//!
//! This module defines the traits shared by the schema model and the
//! renderer so both sides agree on how consistency is checked.

use crate::error::CrudgenResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use crudgen_core::{CrudgenError, CrudgenResult, Validatable};
///
/// struct Column {
///     name: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> CrudgenResult<()> {
///         if self.name.is_empty() {
///             return Err(CrudgenError::schema_issue("Column", "name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `CrudgenError` describing the problem.
    fn validate(&self) -> CrudgenResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) if e.is_validation() => e.issues().to_vec(),
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrudgenError;

    struct Named(&'static str);

    impl Validatable for Named {
        fn validate(&self) -> CrudgenResult<()> {
            if self.0.is_empty() {
                return Err(CrudgenError::schema_validation(
                    "Named",
                    vec!["name is empty".to_string(), "second".to_string()],
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(Named("x").is_valid());
        assert!(!Named("").is_valid());
    }

    #[test]
    fn test_validation_errors_lists_issues() {
        assert!(Named("x").validation_errors().is_empty());
        assert_eq!(
            Named("").validation_errors(),
            vec!["name is empty".to_string(), "second".to_string()]
        );
    }
}
