//! Discriminator domain constraints
//!
//! A hierarchy root whose discriminator mapping is complete gets a constraint
//! limiting the discriminator column to the values of the hierarchy's concrete
//! types.

use crate::convention::{
    ModelFinalizingConvention, PendingConstraint, register_constraints, sql_literal_list,
};
use checkwright_core::{CheckResult, Value};
use checkwright_ir::{CheckConstraint, EntityType, Model, SqlGenerationHelper, TypeMappingSource};
use std::sync::Arc;

/// Generates `CK_<table>_Discriminator` constraints
pub struct DiscriminatorCheckConstraintConvention {
    type_mapping_source: Arc<dyn TypeMappingSource>,
    sql_generation_helper: Arc<dyn SqlGenerationHelper>,
}

impl DiscriminatorCheckConstraintConvention {
    pub fn new(
        type_mapping_source: Arc<dyn TypeMappingSource>,
        sql_generation_helper: Arc<dyn SqlGenerationHelper>,
    ) -> Self {
        Self {
            type_mapping_source,
            sql_generation_helper,
        }
    }

    fn constraint_for(&self, model: &Model, root: &EntityType) -> Option<CheckConstraint> {
        let discriminator = root.discriminator()?;

        if !discriminator.is_complete {
            tracing::trace!(entity = %root.name, "skipping incomplete discriminator mapping");
            return None;
        }

        let Some(table) = root.table() else {
            tracing::trace!(
                entity = %root.name,
                view = ?root.view().map(|view| view.display_name()),
                "skipping hierarchy without table"
            );
            return None;
        };

        let property = root.find_declared_property(&discriminator.property)?;
        let Some(mapping) = self.type_mapping_source.find_mapping(property) else {
            tracing::trace!(entity = %root.name, "skipping discriminator without type mapping");
            return None;
        };
        let Some(column) = property.column_name(&table) else {
            tracing::trace!(entity = %root.name, "skipping discriminator without column");
            return None;
        };

        let mut values: Vec<Value> = Vec::new();
        for entity_type in model.hierarchy_of(&root.name) {
            if entity_type.is_abstract() {
                continue;
            }
            match entity_type.discriminator_value() {
                None | Some(Value::Null) => {}
                Some(value) if values.contains(value) => {}
                Some(value) => values.push(value.clone()),
            }
        }

        if values.is_empty() {
            tracing::trace!(entity = %root.name, "skipping hierarchy without discriminator values");
            return None;
        }

        Some(CheckConstraint::new(
            format!("CK_{}_Discriminator", table.name),
            format!(
                "{} IN ({})",
                self.sql_generation_helper.delimit_identifier(&column),
                sql_literal_list(&mapping, &values)
            ),
        ))
    }
}

impl ModelFinalizingConvention for DiscriminatorCheckConstraintConvention {
    fn name(&self) -> &'static str {
        "discriminator"
    }

    fn process_model_finalizing(&self, model: &mut Model) -> CheckResult<usize> {
        let pending: Vec<PendingConstraint> = model
            .root_entity_types()
            .into_iter()
            .filter_map(|root| {
                self.constraint_for(model, root)
                    .map(|constraint| PendingConstraint::new(&root.name, constraint))
            })
            .collect();

        register_constraints(model, self.name(), pending)
    }
}
