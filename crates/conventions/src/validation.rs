//! Constraints derived from validation annotations
//!
//! Every property contained in a table-backed entity type (including those
//! nested in complex properties) is inspected. Range and value-list
//! annotations become one constraint each; all length annotations on a
//! property are merged into a single constraint; format annotations become
//! regular expression matches rendered in the provider's regex syntax.
//!
//! A property's annotations are processed in a fixed order (range, allowed
//! values, denied values, formats, then length) whatever order they were
//! declared in. Float bounds and values that are infinite or NaN have no SQL
//! literal; annotations carrying them are skipped.

use crate::convention::{
    ModelFinalizingConvention, PendingConstraint, register_constraints, sql_literal_list,
};
use crate::options::ValidationCheckConstraintOptions;
use checkwright_core::{
    CheckError, CheckResult, DatabaseProvider, DialectCapabilities, Value, ValueKind,
};
use checkwright_ir::{
    Annotation, CheckConstraint, EntityType, Model, Property, SqlGenerationHelper, TypeMapping,
    TypeMappingSource,
};
use std::sync::Arc;

// ============================================================================
// Length Bounds
// ============================================================================

/// Merged length bounds of one property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LengthBounds {
    minimum: Option<usize>,
    maximum: Option<usize>,
}

impl LengthBounds {
    fn raise_minimum(&mut self, length: usize) {
        self.minimum = Some(self.minimum.map_or(length, |current| current.max(length)));
    }

    fn lower_maximum(&mut self, length: usize) {
        self.maximum = Some(self.maximum.map_or(length, |current| current.min(length)));
    }
}

/// The column a property's constraints apply to
struct ColumnTarget<'a> {
    entity_type: &'a str,
    table: &'a str,
    column: &'a str,
    column_sql: String,
}

impl ColumnTarget<'_> {
    fn constraint(&self, suffix: &str, sql: String) -> PendingConstraint {
        PendingConstraint::new(
            self.entity_type,
            CheckConstraint::new(format!("CK_{}_{}_{}", self.table, self.column, suffix), sql),
        )
    }
}

/// Processing order of annotations on one property; the merged length
/// constraint always comes last
fn priority(annotation: &Annotation) -> u8 {
    match annotation {
        Annotation::Range { .. } => 0,
        Annotation::AllowedValues(_) => 1,
        Annotation::DeniedValues(_) => 2,
        Annotation::Phone
        | Annotation::CreditCard
        | Annotation::EmailAddress
        | Annotation::Url
        | Annotation::RegularExpression { .. } => 3,
        Annotation::MinLength(_)
        | Annotation::MaxLength(_)
        | Annotation::StringLength { .. }
        | Annotation::Required { .. }
        | Annotation::Length { .. } => 4,
    }
}

// ============================================================================
// Convention
// ============================================================================

/// Generates range, length, value-list and regular expression constraints
pub struct ValidationCheckConstraintConvention {
    options: ValidationCheckConstraintOptions,
    provider: DatabaseProvider,
    capabilities: DialectCapabilities,
    type_mapping_source: Arc<dyn TypeMappingSource>,
    sql_generation_helper: Arc<dyn SqlGenerationHelper>,
    int_type_mapping: Option<TypeMapping>,
}

impl ValidationCheckConstraintConvention {
    pub fn new(
        options: ValidationCheckConstraintOptions,
        provider: DatabaseProvider,
        type_mapping_source: Arc<dyn TypeMappingSource>,
        sql_generation_helper: Arc<dyn SqlGenerationHelper>,
    ) -> Self {
        let int_type_mapping = type_mapping_source.find_mapping_for_kind(&ValueKind::Int32);
        Self {
            capabilities: provider.capabilities(),
            options,
            provider,
            type_mapping_source,
            sql_generation_helper,
            int_type_mapping,
        }
    }

    fn entity_constraints(
        &self,
        entity_type: &EntityType,
        pending: &mut Vec<PendingConstraint>,
    ) -> CheckResult<()> {
        let Some(table) = entity_type.table() else {
            tracing::trace!(
                entity = %entity_type.name,
                view = ?entity_type.view().map(|view| view.display_name()),
                "skipping entity type without table"
            );
            return Ok(());
        };

        for contained in entity_type.contained_properties() {
            let property = contained.property;
            if property.is_shadow {
                continue;
            }

            let Some(column) = contained.column_name(&table) else {
                tracing::trace!(
                    property = %contained.display_path(),
                    table = %table,
                    "skipping property without column"
                );
                continue;
            };

            let target = ColumnTarget {
                entity_type: &entity_type.name,
                table: &table.name,
                column: &column,
                column_sql: self.sql_generation_helper.delimit_identifier(&column),
            };
            self.property_constraints(property, &target, pending)?;
        }

        Ok(())
    }

    fn property_constraints(
        &self,
        property: &Property,
        target: &ColumnTarget<'_>,
        pending: &mut Vec<PendingConstraint>,
    ) -> CheckResult<()> {
        let mut length = LengthBounds::default();
        let tracks_length = self.int_type_mapping.is_some();

        let mut annotations: Vec<&Annotation> = property.annotations().iter().collect();
        annotations.sort_by_key(|annotation| priority(annotation));

        for annotation in annotations {
            match annotation {
                Annotation::Range {
                    minimum,
                    maximum,
                    minimum_is_exclusive,
                    maximum_is_exclusive,
                } => {
                    let bounds = (minimum, maximum, *minimum_is_exclusive, *maximum_is_exclusive);
                    if let Some(sql) = self.range_sql(property, &target.column_sql, bounds) {
                        pending.push(target.constraint("Range", sql));
                    }
                }

                Annotation::MinLength(n) if tracks_length => length.raise_minimum(*n),
                Annotation::StringLength { minimum_length, .. } if tracks_length => {
                    length.raise_minimum(*minimum_length)
                }
                Annotation::Required {
                    allow_empty_strings: false,
                } if tracks_length && property.is_string() => length.raise_minimum(1),
                Annotation::Length {
                    minimum_length,
                    maximum_length,
                } if tracks_length => {
                    length.raise_minimum(*minimum_length);
                    length.lower_maximum(*maximum_length);
                }

                Annotation::AllowedValues(values) => {
                    if let Some(sql) = self.values_sql(property, &target.column_sql, values, false) {
                        pending.push(target.constraint("AllowedValues", sql));
                    }
                }
                Annotation::DeniedValues(values) => {
                    if let Some(sql) = self.values_sql(property, &target.column_sql, values, true) {
                        pending.push(target.constraint("DeniedValues", sql));
                    }
                }

                Annotation::Phone => {
                    self.push_regex(target, "Phone", self.options.phone_pattern(), pending)?
                }
                Annotation::CreditCard => self.push_regex(
                    target,
                    "CreditCard",
                    self.options.credit_card_pattern(),
                    pending,
                )?,
                Annotation::EmailAddress => self.push_regex(
                    target,
                    "EmailAddress",
                    self.options.email_address_pattern(),
                    pending,
                )?,
                Annotation::Url => {
                    self.push_regex(target, "Url", self.options.url_pattern(), pending)?
                }
                Annotation::RegularExpression { pattern } => {
                    self.push_regex(target, "RegularExpression", pattern, pending)?
                }

                Annotation::MinLength(_)
                | Annotation::MaxLength(_)
                | Annotation::StringLength { .. }
                | Annotation::Required { .. }
                | Annotation::Length { .. } => {}
            }
        }

        if let Some(constraint) = self.length_constraint(target, length)? {
            pending.push(constraint);
        }

        Ok(())
    }

    fn range_sql(
        &self,
        property: &Property,
        column_sql: &str,
        (minimum, maximum, minimum_is_exclusive, maximum_is_exclusive): (&Value, &Value, bool, bool),
    ) -> Option<String> {
        let mapping = self.type_mapping_source.find_mapping(property)?;
        let clr_kind = mapping.clr_kind()?;

        if !minimum.is_kind(clr_kind) || !maximum.is_kind(clr_kind) {
            tracing::trace!(
                property = %property.name,
                kind = %clr_kind,
                "skipping range whose bounds do not match the property type"
            );
            return None;
        }

        if !minimum.is_finite() || !maximum.is_finite() {
            tracing::trace!(property = %property.name, "skipping range with a non-finite bound");
            return None;
        }

        let min = mapping.generate_sql_literal(minimum);
        let max = mapping.generate_sql_literal(maximum);
        let lower = if minimum_is_exclusive { ">" } else { ">=" };
        let upper = if maximum_is_exclusive { "<" } else { "<=" };

        let sql = match (minimum, maximum) {
            (Value::Int32(i32::MIN), _) if !minimum_is_exclusive => {
                format!("{} {} {}", column_sql, upper, max)
            }
            (_, Value::Int32(i32::MAX)) if !maximum_is_exclusive => {
                format!("{} {} {}", column_sql, lower, min)
            }
            _ if !minimum_is_exclusive && !maximum_is_exclusive => {
                format!("{} BETWEEN {} AND {}", column_sql, min, max)
            }
            _ => format!(
                "{} {} {} AND {} {} {}",
                column_sql, lower, min, column_sql, upper, max
            ),
        };
        Some(sql)
    }

    fn values_sql(
        &self,
        property: &Property,
        column_sql: &str,
        values: &[Value],
        negated: bool,
    ) -> Option<String> {
        if values.is_empty() {
            tracing::trace!(property = %property.name, "skipping empty value list");
            return None;
        }

        let mapping = self.type_mapping_source.find_mapping(property)?;
        let clr_kind = mapping.clr_kind()?;

        if values.iter().any(|v| !v.is_null() && !v.is_kind(clr_kind)) {
            tracing::trace!(
                property = %property.name,
                kind = %clr_kind,
                "skipping value list whose values do not match the property type"
            );
            return None;
        }

        if !values.iter().all(Value::is_finite) {
            tracing::trace!(property = %property.name, "skipping value list with a non-finite value");
            return None;
        }

        Some(format!(
            "{} {}IN ({})",
            column_sql,
            if negated { "NOT " } else { "" },
            sql_literal_list(&mapping, values)
        ))
    }

    fn push_regex(
        &self,
        target: &ColumnTarget<'_>,
        suffix: &str,
        pattern: &str,
        pending: &mut Vec<PendingConstraint>,
    ) -> CheckResult<()> {
        if !self.options.use_regex {
            return Ok(());
        }

        let template = self
            .capabilities
            .regex
            .ok_or_else(|| CheckError::regex_unsupported(&self.provider.name))?;

        pending.push(target.constraint(suffix, template.render(&target.column_sql, pattern)));
        Ok(())
    }

    fn length_constraint(
        &self,
        target: &ColumnTarget<'_>,
        length: LengthBounds,
    ) -> CheckResult<Option<PendingConstraint>> {
        let Some(minimum) = length.minimum else {
            return Ok(None);
        };

        if let Some(maximum) = length.maximum {
            if minimum > maximum {
                return Err(CheckError::length_conflict(
                    target.table,
                    target.column,
                    minimum,
                    maximum,
                ));
            }
        }

        let (Some(function), Some(int_mapping)) =
            (self.capabilities.length_function, &self.int_type_mapping)
        else {
            tracing::trace!(
                provider = %self.provider,
                column = target.column,
                "skipping length constraint on provider without a length function"
            );
            return Ok(None);
        };

        let literal = |n: usize| match i32::try_from(n) {
            Ok(n) => int_mapping.generate_sql_literal(&Value::Int32(n)),
            Err(_) => n.to_string(),
        };

        let constraint = match length.maximum {
            Some(maximum) => target.constraint(
                "MinMaxLength",
                format!(
                    "{}({}) BETWEEN {} AND {}",
                    function,
                    target.column_sql,
                    literal(minimum),
                    literal(maximum)
                ),
            ),
            None => target.constraint(
                "MinLength",
                format!("{}({}) >= {}", function, target.column_sql, literal(minimum)),
            ),
        };
        Ok(Some(constraint))
    }
}

impl ModelFinalizingConvention for ValidationCheckConstraintConvention {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn process_model_finalizing(&self, model: &mut Model) -> CheckResult<usize> {
        let mut pending = Vec::new();
        for entity_type in model.entity_types() {
            self.entity_constraints(entity_type, &mut pending)?;
        }

        register_constraints(model, self.name(), pending)
    }
}

// ============================================================================
// Tests
// ============================================================================
