//! Model finalizing conventions and the set that runs them
//!
//! A convention inspects the whole model once, after the host has finished
//! building it, and registers check constraints on entity types. Conventions
//! compute everything first and only then mutate the model, so a failing
//! convention leaves no partial output behind.

use checkwright_core::{CheckError, CheckResult, Value};
use checkwright_ir::{CheckConstraint, Model, TypeMapping};

// ============================================================================
// Convention Trait
// ============================================================================

/// A convention that runs once when the model is finalized
pub trait ModelFinalizingConvention: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Inspect the model and register the constraints this convention
    /// derives, returning how many registrations changed the model
    fn process_model_finalizing(&self, model: &mut Model) -> CheckResult<usize>;
}

/// Constraints computed for one entity type, pending registration
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConstraint {
    /// Name of the entity type that receives the constraint
    pub entity_type: String,

    /// The constraint
    pub constraint: CheckConstraint,
}

impl PendingConstraint {
    pub fn new(entity_type: impl Into<String>, constraint: CheckConstraint) -> Self {
        Self {
            entity_type: entity_type.into(),
            constraint,
        }
    }
}

/// Register computed constraints on their entity types.
///
/// Returns how many registrations changed the model.
pub fn register_constraints(
    model: &mut Model,
    convention: &str,
    pending: Vec<PendingConstraint>,
) -> CheckResult<usize> {
    let mut changed = 0;
    for PendingConstraint {
        entity_type,
        constraint,
    } in pending
    {
        let target = model
            .find_entity_type_mut(&entity_type)
            .ok_or_else(|| CheckError::EntityNotFound(entity_type.clone()))?;

        tracing::debug!(
            convention,
            entity = %entity_type,
            constraint = %constraint.name,
            sql = %constraint.sql,
            "registering check constraint"
        );

        if target.add_check_constraint(constraint.name, constraint.sql) {
            changed += 1;
        }
    }
    Ok(changed)
}

/// Comma-separated SQL literals of `values`, rendered by `mapping`
pub fn sql_literal_list(mapping: &TypeMapping, values: &[Value]) -> String {
    values
        .iter()
        .map(|value| mapping.generate_sql_literal(value))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Convention Set
// ============================================================================

/// Ordered collection of model finalizing conventions
#[derive(Default)]
pub struct ConventionSet {
    model_finalizing_conventions: Vec<Box<dyn ModelFinalizingConvention>>,
}

impl ConventionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a convention
    pub fn add(&mut self, convention: Box<dyn ModelFinalizingConvention>) {
        self.model_finalizing_conventions.push(convention);
    }

    /// Append a convention (builder style)
    pub fn with_convention(mut self, convention: impl ModelFinalizingConvention + 'static) -> Self {
        self.add(Box::new(convention));
        self
    }

    /// Names of the conventions in run order
    pub fn names(&self) -> Vec<&'static str> {
        self.model_finalizing_conventions
            .iter()
            .map(|c| c.name())
            .collect()
    }

    /// Number of conventions
    pub fn len(&self) -> usize {
        self.model_finalizing_conventions.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.model_finalizing_conventions.is_empty()
    }

    /// Run every convention once, stopping at the first error.
    ///
    /// Returns how many registrations added or replaced a constraint.
    pub fn finalize(&self, model: &mut Model) -> CheckResult<usize> {
        let before = model.check_constraint_count();
        let mut changed = 0;

        for convention in &self.model_finalizing_conventions {
            tracing::trace!(convention = convention.name(), "running convention");
            changed += convention.process_model_finalizing(model)?;
        }

        tracing::info!(
            conventions = self.len(),
            entity_types = model.entity_count(),
            added = model.check_constraint_count().saturating_sub(before),
            changed,
            "model finalized"
        );
        Ok(changed)
    }
}

impl std::fmt::Debug for ConventionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionSet")
            .field("model_finalizing_conventions", &self.names())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
