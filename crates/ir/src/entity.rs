//! Entity types
//!
//! An `EntityType` holds only what it declares itself: inherited properties
//! live on the base type and are reached through the `Model`. Check
//! constraints registered by conventions are stored on the entity type in
//! registration order.

use crate::property::{ComplexProperty, Property};
use crate::store::StoreObjectIdentifier;
use checkwright_core::{CheckError, CheckResult, Validatable, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Check Constraints
// ============================================================================

/// A named SQL check constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckConstraint {
    /// Constraint name, unique within the owning entity type
    pub name: String,

    /// Boolean SQL expression
    pub sql: String,
}

impl CheckConstraint {
    /// Create a check constraint
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}

impl std::fmt::Display for CheckConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CONSTRAINT {} CHECK ({})", self.name, self.sql)
    }
}

/// Discriminator column configuration of a hierarchy root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorMapping {
    /// Name of the discriminator property on the root
    pub property: String,

    /// Whether every value the column can hold belongs to a mapped type
    #[serde(default)]
    pub is_complete: bool,
}

// ============================================================================
// Contained Properties
// ============================================================================

/// A property reached from an entity type, possibly through complex properties
#[derive(Debug, Clone)]
pub struct ContainedProperty<'a> {
    /// The property
    pub property: &'a Property,

    /// Names of the complex properties leading to it, outermost first
    pub path: Vec<&'a str>,
}

impl ContainedProperty<'_> {
    /// Column name in a table; nested properties default to `Outer_Inner_Name`
    pub fn column_name(&self, store_object: &StoreObjectIdentifier) -> Option<String> {
        let prefix: String = self.path.iter().map(|name| format!("{}_", name)).collect();
        self.property.column_name_with_prefix(store_object, &prefix)
    }

    /// Dotted path for diagnostics (e.g. `Address.City`)
    pub fn display_path(&self) -> String {
        let mut parts = self.path.clone();
        parts.push(&self.property.name);
        parts.join(".")
    }
}

// ============================================================================
// Entity Type
// ============================================================================

/// An entity type of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    /// Entity type name, unique within the model
    pub name: String,

    /// Table the entity type maps to; `None` for views and unmapped types
    #[serde(default)]
    pub table_name: Option<String>,

    /// View the entity type maps to
    #[serde(default)]
    pub view_name: Option<String>,

    /// Database schema
    #[serde(default)]
    pub schema: Option<String>,

    /// Name of the base entity type
    #[serde(default)]
    pub base_type: Option<String>,

    /// Abstract types have no rows of their own
    #[serde(default)]
    pub is_abstract: bool,

    /// Discriminator configuration (hierarchy roots only)
    #[serde(default)]
    pub discriminator: Option<DiscriminatorMapping>,

    /// Discriminator value identifying rows of this type
    #[serde(default)]
    pub discriminator_value: Option<Value>,

    /// Declared scalar properties
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Declared complex properties
    #[serde(default)]
    pub complex_properties: Vec<ComplexProperty>,

    /// Registered check constraints
    #[serde(default)]
    pub check_constraints: Vec<CheckConstraint>,
}

impl EntityType {
    /// Create an entity type mapped to a table of the same name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            table_name: Some(name.clone()),
            name,
            view_name: None,
            schema: None,
            base_type: None,
            is_abstract: false,
            discriminator: None,
            discriminator_value: None,
            properties: Vec::new(),
            complex_properties: Vec::new(),
            check_constraints: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Map to a view instead of a table
    pub fn with_view_name(mut self, view_name: impl Into<String>) -> Self {
        self.table_name = None;
        self.view_name = Some(view_name.into());
        self
    }

    /// Leave the entity type unmapped
    pub fn without_table(mut self) -> Self {
        self.table_name = None;
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Derive from a base entity type
    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Mark as abstract
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Configure the discriminator (hierarchy roots only)
    pub fn with_discriminator(mut self, property: impl Into<String>, is_complete: bool) -> Self {
        self.discriminator = Some(DiscriminatorMapping {
            property: property.into(),
            is_complete,
        });
        self
    }

    /// Set the discriminator value
    pub fn with_discriminator_value(mut self, value: impl Into<Value>) -> Self {
        self.discriminator_value = Some(value.into());
        self
    }

    /// Add a property
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a complex property
    pub fn with_complex_property(mut self, complex_property: ComplexProperty) -> Self {
        self.complex_properties.push(complex_property);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Table name, if table-backed
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Schema
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The table this entity type maps to
    pub fn table(&self) -> Option<StoreObjectIdentifier> {
        self.table_name
            .as_ref()
            .map(|name| StoreObjectIdentifier::table(name.clone(), self.schema.clone()))
    }

    /// The view this entity type maps to
    pub fn view(&self) -> Option<StoreObjectIdentifier> {
        self.view_name
            .as_ref()
            .map(|name| StoreObjectIdentifier::view(name.clone(), self.schema.clone()))
    }

    /// Check if this is an abstract type
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Discriminator configuration
    pub fn discriminator(&self) -> Option<&DiscriminatorMapping> {
        self.discriminator.as_ref()
    }

    /// Discriminator value
    pub fn discriminator_value(&self) -> Option<&Value> {
        self.discriminator_value.as_ref()
    }

    /// Properties declared on this type (not inherited ones)
    pub fn declared_properties(&self) -> &[Property] {
        &self.properties
    }

    /// Find a declared property by name
    pub fn find_declared_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Declared properties followed by every property nested in complex
    /// properties, at any depth.
    pub fn contained_properties(&self) -> Vec<ContainedProperty<'_>> {
        let mut result: Vec<ContainedProperty<'_>> = self
            .properties
            .iter()
            .map(|property| ContainedProperty {
                property,
                path: Vec::new(),
            })
            .collect();

        let mut stack: Vec<(&ComplexProperty, Vec<&str>)> = self
            .complex_properties
            .iter()
            .rev()
            .map(|complex| (complex, Vec::new()))
            .collect();

        while let Some((complex, mut path)) = stack.pop() {
            path.push(complex.name.as_str());
            for property in &complex.complex_type.properties {
                result.push(ContainedProperty {
                    property,
                    path: path.clone(),
                });
            }
            for nested in complex.complex_type.complex_properties.iter().rev() {
                stack.push((nested, path.clone()));
            }
        }

        result
    }

    // ========================================================================
    // Check constraints
    // ========================================================================

    /// Registered check constraints in registration order
    pub fn check_constraints(&self) -> &[CheckConstraint] {
        &self.check_constraints
    }

    /// Find a check constraint by name
    pub fn find_check_constraint(&self, name: &str) -> Option<&CheckConstraint> {
        self.check_constraints.iter().find(|c| c.name == name)
    }

    /// Register a check constraint.
    ///
    /// A constraint with the same name is replaced in place. Returns `false`
    /// when an identical constraint was already registered.
    pub fn add_check_constraint(&mut self, name: impl Into<String>, sql: impl Into<String>) -> bool {
        let constraint = CheckConstraint::new(name, sql);

        match self
            .check_constraints
            .iter_mut()
            .find(|existing| existing.name == constraint.name)
        {
            Some(existing) if existing.sql == constraint.sql => false,
            Some(existing) => {
                tracing::debug!(
                    entity = %self.name,
                    constraint = %constraint.name,
                    previous = %existing.sql,
                    sql = %constraint.sql,
                    "replacing check constraint"
                );
                existing.sql = constraint.sql;
                true
            }
            None => {
                self.check_constraints.push(constraint);
                true
            }
        }
    }

    /// Remove a check constraint by name
    pub fn remove_check_constraint(&mut self, name: &str) -> Option<CheckConstraint> {
        let pos = self.check_constraints.iter().position(|c| c.name == name)?;
        Some(self.check_constraints.remove(pos))
    }
}

impl Validatable for EntityType {
    fn validate(&self) -> CheckResult<()> {
        if self.name.is_empty() {
            return Err(CheckError::entity_validation(
                &self.name,
                "Entity type name cannot be empty",
            ));
        }

        if self.table_name.as_deref() == Some("") {
            return Err(CheckError::entity_validation(
                &self.name,
                "Table name cannot be empty",
            ));
        }

        for property in &self.properties {
            property.validate().map_err(|e| {
                CheckError::entity_validation(&self.name, format!("{}: {}", property.name, e))
            })?;
        }

        let mut names = HashSet::new();
        let declared = self
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.complex_properties.iter().map(|c| c.name.as_str()));
        for name in declared {
            if !names.insert(name) {
                return Err(CheckError::DuplicateProperty {
                    entity: self.name.clone(),
                    property: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
