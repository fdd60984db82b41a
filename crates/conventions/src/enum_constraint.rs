//! Enum domain constraints
//!
//! Columns backed by an enum property are constrained to the values of the
//! enum's members, after the property's value converter is applied. Integral
//! domains without gaps collapse to a `BETWEEN`; anything else is an `IN` list
//! in member declaration order.

use crate::contiguous::contiguous_bounds;
use crate::convention::{
    ModelFinalizingConvention, PendingConstraint, register_constraints, sql_literal_list,
};
use checkwright_core::{CheckResult, Value, ValueKind};
use checkwright_ir::{
    CheckConstraint, Model, Property, SqlGenerationHelper, StoreObjectIdentifier,
    TypeMappingSource,
};
use std::sync::Arc;

/// Generates `CK_<table>_<column>_Enum` constraints
pub struct EnumCheckConstraintConvention {
    type_mapping_source: Arc<dyn TypeMappingSource>,
    sql_generation_helper: Arc<dyn SqlGenerationHelper>,
}

impl EnumCheckConstraintConvention {
    pub fn new(
        type_mapping_source: Arc<dyn TypeMappingSource>,
        sql_generation_helper: Arc<dyn SqlGenerationHelper>,
    ) -> Self {
        Self {
            type_mapping_source,
            sql_generation_helper,
        }
    }

    /// Constraint for one declared property, if it is an enum with a
    /// constrainable domain
    fn constraint_for(
        &self,
        property: &Property,
        table: &StoreObjectIdentifier,
    ) -> Option<CheckConstraint> {
        let enum_type = property.clr_type().as_enum()?;

        if enum_type.is_flags {
            tracing::trace!(property = %property.name, "skipping flags enum");
            return None;
        }

        let Some(mapping) = self.type_mapping_source.find_mapping(property) else {
            tracing::trace!(property = %property.name, "skipping enum without type mapping");
            return None;
        };

        let Some(column) = property.column_name(table) else {
            tracing::trace!(property = %property.name, table = %table, "skipping enum without column");
            return None;
        };

        if enum_type.is_empty() {
            tracing::trace!(property = %property.name, "skipping empty enum");
            return None;
        }

        if mapping.provider_kind.is_enum() {
            tracing::trace!(property = %property.name, "skipping native database enum");
            return None;
        }

        let mut values: Vec<Value> = Vec::with_capacity(enum_type.members.len());
        for member in &enum_type.members {
            let Some(value) = mapping.provider_value(member) else {
                tracing::trace!(
                    property = %property.name,
                    member = %member.name,
                    "skipping enum whose member does not convert to the provider kind"
                );
                return None;
            };
            if !values.contains(&value) {
                values.push(value);
            }
        }

        let column_sql = self.sql_generation_helper.delimit_identifier(&column);
        let sql = match integral_bounds(&mapping.provider_kind, &values) {
            Some((min, max)) => format!("{} BETWEEN {} AND {}", column_sql, min, max),
            None => format!("{} IN ({})", column_sql, sql_literal_list(&mapping, &values)),
        };

        Some(CheckConstraint::new(
            format!("CK_{}_{}_Enum", table.name, column),
            sql,
        ))
    }
}

/// Bounds of an unbroken integral run of values
fn integral_bounds(provider_kind: &ValueKind, values: &[Value]) -> Option<(i128, i128)> {
    if !provider_kind.is_integral() {
        return None;
    }
    let integers = values
        .iter()
        .map(Value::as_i128)
        .collect::<Option<Vec<i128>>>()?;
    contiguous_bounds(&integers)
}

impl ModelFinalizingConvention for EnumCheckConstraintConvention {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn process_model_finalizing(&self, model: &mut Model) -> CheckResult<usize> {
        let mut pending = Vec::new();

        for entity_type in model.entity_types() {
            let Some(table) = entity_type.table() else {
                tracing::trace!(
                    entity = %entity_type.name,
                    view = ?entity_type.view().map(|view| view.display_name()),
                    "skipping entity type without table"
                );
                continue;
            };

            for property in entity_type.declared_properties() {
                if let Some(constraint) = self.constraint_for(property, &table) {
                    pending.push(PendingConstraint::new(&entity_type.name, constraint));
                }
            }
        }

        register_constraints(model, self.name(), pending)
    }
}
