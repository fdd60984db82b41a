//! JSON model documents
//!
//! A host that builds its model elsewhere can hand it over as a JSON string.
//! Documents are wrapped with a format version so older readers refuse newer
//! documents instead of misreading them. Everything here is string-in,
//! string-out.

use crate::{FORMAT_VERSION, Model};
use checkwright_core::{CheckError, CheckResult, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// Model Document Wrapper
// ============================================================================

/// Versioned wrapper around a serialized model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Document format version
    pub format_version: u32,

    /// The model
    pub model: Model,
}

impl ModelDocument {
    /// Wrap a model in a document of the current format
    pub fn new(model: Model) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model,
        }
    }

    /// Reject documents written by a newer format
    pub fn check_version(&self) -> CheckResult<()> {
        if self.format_version > FORMAT_VERSION {
            return Err(CheckError::UnsupportedFormatVersion {
                supported: FORMAT_VERSION,
                found: self.format_version,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a model to a pretty-printed JSON string
pub fn save_model_to_string(model: &Model) -> CheckResult<String> {
    let document = ModelDocument::new(model.clone());
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Save a model to a compact JSON string
pub fn save_model_to_compact_string(model: &Model) -> CheckResult<String> {
    let document = ModelDocument::new(model.clone());
    Ok(serde_json::to_string(&document)?)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load and validate a model from a JSON string
///
/// Accepts either a versioned document or a bare model object.
///
/// # Example
///
/// ```rust,ignore
/// use checkwright_ir::load_model_from_string;
///
/// let model = load_model_from_string(r#"{"format_version":1,"model":{"entity_types":[]}}"#)?;
/// assert_eq!(model.entity_count(), 0);
/// ```
pub fn load_model_from_string(json: &str) -> CheckResult<Model> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let model = if value.get("format_version").is_some() {
        let document: ModelDocument = serde_json::from_value(value)?;
        document.check_version()?;
        document.model
    } else {
        serde_json::from_value(value)?
    };

    model.validate()?;
    Ok(model)
}

// ============================================================================
// Tests
// ============================================================================
