//! Shared helpers for the convention integration tests

#![allow(dead_code)]

use checkwright_conventions::{
    CheckConstraintsConventionSetPlugin, CheckConstraintsOptions, ConventionSet,
};
use checkwright_core::{CheckResult, DatabaseProvider};
use checkwright_ir::{CheckConstraint, Model};

/// Route `tracing` output to the test harness; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Finalize `model` with the conventions `options` enables for `provider`,
/// returning how many registrations changed it
pub fn finalize(
    model: &mut Model,
    options: CheckConstraintsOptions,
    provider: DatabaseProvider,
) -> CheckResult<usize> {
    init_tracing();
    CheckConstraintsConventionSetPlugin::for_provider(options, provider)
        .modify_conventions(ConventionSet::new())
        .finalize(model)
}

/// Options with only enum constraints enabled
pub fn enums() -> CheckConstraintsOptions {
    CheckConstraintsOptions::builder()
        .use_enum_check_constraints()
        .build()
}

/// Options with only discriminator constraints enabled
pub fn discriminators() -> CheckConstraintsOptions {
    CheckConstraintsOptions::builder()
        .use_discriminator_check_constraints()
        .build()
}

/// Options with only validation constraints enabled, default regex settings
pub fn validation() -> CheckConstraintsOptions {
    CheckConstraintsOptions::builder()
        .use_validation_check_constraints(|v| v)
        .build()
}

/// The constraint named `name` on entity type `entity`
pub fn constraint<'a>(model: &'a Model, entity: &str, name: &str) -> Option<&'a CheckConstraint> {
    model
        .find_entity_type(entity)
        .and_then(|entity_type| entity_type.find_check_constraint(name))
}

/// SQL of the constraint named `name` on entity type `entity`
pub fn sql(model: &Model, entity: &str, name: &str) -> Option<String> {
    constraint(model, entity, name).map(|c| c.sql.clone())
}

/// Names of every constraint on entity type `entity`, in registration order
pub fn names(model: &Model, entity: &str) -> Vec<String> {
    model
        .find_entity_type(entity)
        .map(|entity_type| {
            entity_type
                .check_constraints()
                .iter()
                .map(|c| c.name.clone())
                .collect()
        })
        .unwrap_or_default()
}
