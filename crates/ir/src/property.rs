//! Properties, complex (value object) properties, and enum types
//!
//! A `Property` maps to a single column per table. Complex properties group
//! nested properties whose columns live in the containing entity's table.

use crate::annotation::Annotation;
use crate::store::StoreObjectIdentifier;
use crate::type_mapping::ValueConverter;
use checkwright_core::{CheckError, CheckResult, Validatable, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Enum Types
// ============================================================================

/// A member of an enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name
    pub name: String,

    /// Underlying value
    pub value: Value,
}

/// An enumeration type used as the type of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    /// Type name
    pub name: String,

    /// Underlying integral kind of the members
    #[serde(default = "default_underlying")]
    pub underlying: ValueKind,

    /// Bit-flags enums accept combinations of members
    #[serde(default)]
    pub is_flags: bool,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

fn default_underlying() -> ValueKind {
    ValueKind::Int32
}

impl EnumType {
    /// Create an empty `Int32`-backed enum
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: ValueKind::Int32,
            is_flags: false,
            members: Vec::new(),
        }
    }

    /// Set the underlying kind
    pub fn with_underlying(mut self, underlying: ValueKind) -> Self {
        self.underlying = underlying;
        self
    }

    /// Mark as a flags enum
    pub fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }

    /// Add a member
    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Check if the enum has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ============================================================================
// CLR Type
// ============================================================================

/// The model-side type of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClrType {
    /// A scalar of the given kind
    Scalar(ValueKind),

    /// An enumeration
    Enum(EnumType),
}

impl ClrType {
    /// The scalar kind, if this is not an enum
    pub fn scalar_kind(&self) -> Option<&ValueKind> {
        match self {
            ClrType::Scalar(kind) => Some(kind),
            ClrType::Enum(_) => None,
        }
    }

    /// The enum type, if this is one
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            ClrType::Enum(enum_type) => Some(enum_type),
            ClrType::Scalar(_) => None,
        }
    }

    /// Check if this is a string
    pub fn is_string(&self) -> bool {
        matches!(self, ClrType::Scalar(ValueKind::String))
    }
}

impl From<ValueKind> for ClrType {
    fn from(kind: ValueKind) -> Self {
        ClrType::Scalar(kind)
    }
}

impl From<EnumType> for ClrType {
    fn from(enum_type: EnumType) -> Self {
        ClrType::Enum(enum_type)
    }
}

// ============================================================================
// Property
// ============================================================================

/// A scalar property of an entity or complex type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,

    /// Model-side type
    pub clr_type: ClrType,

    /// Whether the property accepts null
    #[serde(default)]
    pub nullable: bool,

    /// Shadow properties have no backing member and carry no annotations
    #[serde(default)]
    pub is_shadow: bool,

    /// Column name; defaults to the property name
    #[serde(default)]
    pub column_name: Option<String>,

    /// Per-table column names; `None` means the property is not stored in that table
    #[serde(default)]
    pub table_columns: BTreeMap<String, Option<String>>,

    /// Conversion applied before values reach the database
    #[serde(default)]
    pub value_converter: Option<ValueConverter>,

    /// Provider-side kind, when it differs from the model-side kind
    #[serde(default)]
    pub provider_kind: Option<ValueKind>,

    /// Explicit store type (e.g. `nvarchar(200)`)
    #[serde(default)]
    pub store_type: Option<String>,

    /// Declared validation annotations
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, clr_type: impl Into<ClrType>) -> Self {
        Self {
            name: name.into(),
            clr_type: clr_type.into(),
            nullable: false,
            is_shadow: false,
            column_name: None,
            table_columns: BTreeMap::new(),
            value_converter: None,
            provider_kind: None,
            store_type: None,
            annotations: Vec::new(),
        }
    }

    /// String property
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::String)
    }

    /// 32-bit integer property
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Int32)
    }

    /// Enum property
    pub fn enumeration(name: impl Into<String>, enum_type: EnumType) -> Self {
        Self::new(name, enum_type)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Mark as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as a shadow property
    pub fn shadow(mut self) -> Self {
        self.is_shadow = true;
        self
    }

    /// Set the column name
    pub fn with_column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Override the column name in one table
    pub fn with_table_column(
        mut self,
        table: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        self.table_columns
            .insert(table.into(), Some(column_name.into()));
        self
    }

    /// Exclude the property from one table
    pub fn without_table_column(mut self, table: impl Into<String>) -> Self {
        self.table_columns.insert(table.into(), None);
        self
    }

    /// Set the value converter
    pub fn with_converter(mut self, converter: ValueConverter) -> Self {
        self.value_converter = Some(converter);
        self
    }

    /// Set the provider-side kind
    pub fn with_provider_kind(mut self, kind: ValueKind) -> Self {
        self.provider_kind = Some(kind);
        self
    }

    /// Set the store type
    pub fn with_store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Column name of this property in a table, or `None` if it is not stored there
    pub fn column_name(&self, store_object: &StoreObjectIdentifier) -> Option<String> {
        self.column_name_with_prefix(store_object, "")
    }

    /// Column name for a property nested in complex properties.
    ///
    /// The prefix only applies to the default name, never to explicit names.
    pub(crate) fn column_name_with_prefix(
        &self,
        store_object: &StoreObjectIdentifier,
        prefix: &str,
    ) -> Option<String> {
        if let Some(column) = self.table_columns.get(&store_object.name) {
            return column.clone();
        }
        Some(
            self.column_name
                .clone()
                .unwrap_or_else(|| format!("{}{}", prefix, self.name)),
        )
    }

    /// Declared annotations
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Model-side type
    pub fn clr_type(&self) -> &ClrType {
        &self.clr_type
    }

    /// Check if the property is a string
    pub fn is_string(&self) -> bool {
        self.clr_type.is_string()
    }
}

impl Validatable for Property {
    fn validate(&self) -> CheckResult<()> {
        if self.name.is_empty() {
            return Err(CheckError::InvalidConfig(
                "Property name cannot be empty".to_string(),
            ));
        }

        if let ClrType::Enum(enum_type) = &self.clr_type {
            let mut names = HashSet::new();
            for member in &enum_type.members {
                if !names.insert(member.name.as_str()) {
                    return Err(CheckError::InvalidConfig(format!(
                        "Enum '{}' declares member '{}' twice",
                        enum_type.name, member.name
                    )));
                }

                let fits = member
                    .value
                    .as_i128()
                    .and_then(|n| Value::from_i128(&enum_type.underlying, n))
                    .is_some();
                if enum_type.underlying.is_integral() && !fits {
                    return Err(CheckError::InvalidConfig(format!(
                        "Enum '{}' member '{}' value {} does not fit its underlying kind {}",
                        enum_type.name, member.name, member.value, enum_type.underlying
                    )));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Complex Properties
// ============================================================================

/// A value object whose properties are stored in the containing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexType {
    /// Type name
    pub name: String,

    /// Scalar properties
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Nested complex properties
    #[serde(default)]
    pub complex_properties: Vec<ComplexProperty>,
}

impl ComplexType {
    /// Create an empty complex type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            complex_properties: Vec::new(),
        }
    }

    /// Add a property
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a nested complex property
    pub fn with_complex_property(mut self, complex_property: ComplexProperty) -> Self {
        self.complex_properties.push(complex_property);
        self
    }
}

/// A property whose type is a complex type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexProperty {
    /// Property name
    pub name: String,

    /// The nested type
    pub complex_type: ComplexType,
}

impl ComplexProperty {
    /// Create a complex property
    pub fn new(name: impl Into<String>, complex_type: ComplexType) -> Self {
        Self {
            name: name.into(),
            complex_type,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
