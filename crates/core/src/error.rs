//! Error types for Checkwright
//!
//! Most conditions the conventions meet while walking a model are not errors:
//! a missing table, column, or type mapping simply means no constraint is
//! generated. The variants here are the situations that must stop model
//! finalization, plus model-shape and serialization failures.

use thiserror::Error;

/// The main error type for Checkwright
#[derive(Debug, Error)]
pub enum CheckError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Merged length annotations describe an unsatisfiable column
    #[error(
        "The minimum length ({minimum}) specified for [{table}].[{column}] exceeds the maximum allowable length ({maximum})."
    )]
    LengthBoundsConflict {
        table: String,
        column: String,
        minimum: usize,
        maximum: usize,
    },

    /// A regex-based constraint was requested on a provider without a regex mechanism
    #[error("Provider {provider} doesn't support regular expressions")]
    RegexUnsupported { provider: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Model Errors
    // ========================================================================
    /// Entity type not found in the model
    #[error("Entity type not found: {0}")]
    EntityNotFound(String),

    /// Property not found on an entity type
    #[error("Property '{property}' not found on entity type '{entity}'")]
    PropertyNotFound { entity: String, property: String },

    /// An entity type names a base type the model does not contain
    #[error("Entity type '{entity}' derives from unknown base type '{base}'")]
    UnknownBaseType { entity: String, base: String },

    /// The inheritance chain of an entity type loops back on itself
    #[error("Inheritance cycle detected at entity type '{0}'")]
    InheritanceCycle(String),

    /// Duplicate entity type name
    #[error("Duplicate entity type name: '{0}' already exists")]
    DuplicateEntity(String),

    /// Duplicate property name
    #[error("Duplicate property name: '{property}' already exists on entity type '{entity}'")]
    DuplicateProperty { entity: String, property: String },

    /// Entity type validation failed
    #[error("Entity type validation failed for '{entity}': {message}")]
    EntityValidation { entity: String, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Model document written by a newer format
    #[error("Unsupported model format version: expected at most {supported}, found {found}")]
    UnsupportedFormatVersion { supported: u32, found: u32 },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl CheckError {
    /// Create a length conflict error
    pub fn length_conflict(
        table: impl Into<String>,
        column: impl Into<String>,
        minimum: usize,
        maximum: usize,
    ) -> Self {
        CheckError::LengthBoundsConflict {
            table: table.into(),
            column: column.into(),
            minimum,
            maximum,
        }
    }

    /// Create an unsupported regex error
    pub fn regex_unsupported(provider: impl Into<String>) -> Self {
        CheckError::RegexUnsupported {
            provider: provider.into(),
        }
    }

    /// Create an entity validation error
    pub fn entity_validation(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        CheckError::EntityValidation {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        CheckError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        CheckError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error reports a contradictory or unsupported configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CheckError::LengthBoundsConflict { .. }
                | CheckError::RegexUnsupported { .. }
                | CheckError::InvalidConfig(_)
        )
    }

    /// Check if this error reports a malformed model
    pub fn is_model(&self) -> bool {
        matches!(
            self,
            CheckError::EntityNotFound(_)
                | CheckError::PropertyNotFound { .. }
                | CheckError::UnknownBaseType { .. }
                | CheckError::InheritanceCycle(_)
                | CheckError::DuplicateEntity(_)
                | CheckError::DuplicateProperty { .. }
                | CheckError::EntityValidation { .. }
        )
    }

    /// Check if this error came from reading or writing a document
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            CheckError::Json(_) | CheckError::Toml(_) | CheckError::UnsupportedFormatVersion { .. }
        )
    }
}

/// Result type alias using CheckError
pub type CheckResult<T> = Result<T, CheckError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> CheckResult<T>;
}

impl<T, E: Into<CheckError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> CheckResult<T> {
        self.map_err(|e| {
            let err: CheckError = e.into();
            CheckError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
