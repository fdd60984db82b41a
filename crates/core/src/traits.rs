//! Core traits for Checkwright

use crate::error::CheckResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can check their own structural consistency
///
/// # Example
///
/// ```rust,ignore
/// use checkwright_core::{CheckError, CheckResult, Validatable};
///
/// struct Table {
///     name: String,
/// }
///
/// impl Validatable for Table {
///     fn validate(&self) -> CheckResult<()> {
///         if self.name.is_empty() {
///             return Err(CheckError::InvalidConfig("table name cannot be empty".into()));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> CheckResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;

    struct Named(&'static str);

    impl Validatable for Named {
        fn validate(&self) -> CheckResult<()> {
            if self.0.is_empty() {
                return Err(CheckError::InvalidConfig("name cannot be empty".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(Named("Blog").is_valid());
        assert!(Named("Blog").validation_errors().is_empty());

        let errors = Named("").validation_errors();
        assert_eq!(errors, vec!["Invalid configuration: name cannot be empty".to_string()]);
    }
}
