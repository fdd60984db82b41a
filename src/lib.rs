//! # Checkwright
//!
//! SQL `CHECK` constraint synthesis for relational models.
//!
//! A host builds a [`Model`] describing its entity types, then finalizes it
//! with the conventions selected by [`CheckConstraintsOptions`]. Each
//! convention attaches named constraints to the entity types; the host's
//! migration machinery turns them into DDL.
//!
//! ```rust,ignore
//! use checkwright::prelude::*;
//!
//! let mut model = Model::new().with_entity_type(
//!     EntityType::new("Blog")
//!         .with_property(Property::int("Rating").with_annotation(Annotation::range(1, 5))),
//! );
//!
//! let options = CheckConstraintsOptions::builder()
//!     .use_all_check_constraints(|v| v)
//!     .build();
//! let summary = checkwright::finalize_model(&mut model, &options, DatabaseProvider::sql_server())?;
//! assert_eq!(summary.added(), 1);
//! ```

// ============================================================================
// Re-exports
// ============================================================================

pub use checkwright_conventions as conventions;
pub use checkwright_ir as ir;

pub use checkwright_conventions::{
    CheckConstraintsConventionSetPlugin, CheckConstraintsOptions, ConventionSet,
    ModelFinalizingConvention, ValidationCheckConstraintOptions,
};
pub use checkwright_core::{
    CheckError, CheckResult, DatabaseProvider, Dialect, ResultExt, Validatable, Value, ValueKind,
};
pub use checkwright_ir::{
    Annotation, CheckConstraint, EntityType, Model, Property, load_model_from_string,
    save_model_to_string,
};

/// Commonly used types
pub mod prelude {
    pub use checkwright_conventions::{
        CheckConstraintsConventionSetPlugin, CheckConstraintsOptions, ConventionSet,
        ValidationCheckConstraintOptions,
    };
    pub use checkwright_core::{
        CheckError, CheckResult, DatabaseProvider, Dialect, Validatable, Value, ValueKind,
    };
    pub use checkwright_ir::{
        Annotation, CheckConstraint, ComplexProperty, ComplexType, EntityType, EnumType, Model,
        Property, ValueConverter,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Finalization
// ============================================================================

/// Outcome of one finalization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizationSummary {
    /// Provider the model was finalized for
    pub provider: String,
    /// Conventions that ran, in order
    pub conventions: Vec<&'static str>,
    /// Number of entity types in the model
    pub entity_types: usize,
    /// Constraints registered before the pass
    pub constraints_before: usize,
    /// Constraints registered after the pass
    pub constraints_after: usize,
    /// Registrations that added a constraint or replaced one's SQL
    pub changed: usize,
}

impl FinalizationSummary {
    /// Net number of constraints the pass added
    pub fn added(&self) -> usize {
        self.constraints_after.saturating_sub(self.constraints_before)
    }

    /// Number of existing constraints whose SQL the pass replaced
    pub fn replaced(&self) -> usize {
        self.changed.saturating_sub(self.added())
    }
}

impl std::fmt::Display for FinalizationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Provider:          {}", self.provider)?;
        writeln!(f, "Conventions:       {}", self.conventions.join(", "))?;
        writeln!(f, "Entity types:      {}", self.entity_types)?;
        write!(
            f,
            "Check constraints: {} (+{}, {} replaced)",
            self.constraints_after,
            self.added(),
            self.replaced()
        )
    }
}

/// Finalize `model` with the conventions `options` enables for `provider`.
///
/// Model validation problems are logged and do not stop the pass; only the
/// conventions' own fatal errors do.
pub fn finalize_model(
    model: &mut Model,
    options: &CheckConstraintsOptions,
    provider: DatabaseProvider,
) -> CheckResult<FinalizationSummary> {
    if let Err(e) = model.validate() {
        tracing::warn!("Model validation warning: {}", e);
    }
    if !options.is_enabled() {
        tracing::debug!("No check constraint conventions enabled");
    }

    let plugin = CheckConstraintsConventionSetPlugin::for_provider(options.clone(), provider);
    let conventions = plugin.modify_conventions(ConventionSet::new());
    let constraints_before = model.check_constraint_count();

    let changed = conventions.finalize(model)?;

    Ok(FinalizationSummary {
        provider: plugin.provider().name.clone(),
        conventions: conventions.names(),
        entity_types: model.entity_count(),
        constraints_before,
        constraints_after: model.check_constraint_count(),
        changed,
    })
}

/// Load a JSON model document, finalize it, and return the updated document
pub fn finalize_model_json(
    json: &str,
    options: &CheckConstraintsOptions,
    provider: DatabaseProvider,
) -> CheckResult<String> {
    let mut model = load_model_from_string(json)?;
    finalize_model(&mut model, options, provider)?;
    save_model_to_string(&model)
}

// ============================================================================
// Tests
// ============================================================================
