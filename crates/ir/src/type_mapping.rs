//! Type mappings and value converters
//!
//! A `TypeMapping` describes how a property's values reach the database: the
//! store type, the provider-side kind after conversion, and the dialect whose
//! literal syntax is used when values are embedded in SQL.

use crate::property::{ClrType, EnumMember};
use checkwright_core::{Dialect, Value, ValueKind, sql_literal};
use serde::{Deserialize, Serialize};

/// Conversion applied to enum values before they are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueConverter {
    /// Members are stored by name
    EnumToString,

    /// Members are stored as another integral kind
    EnumToNumber(ValueKind),
}

impl ValueConverter {
    /// Provider-side kind produced by this converter
    pub fn provider_kind(&self) -> ValueKind {
        match self {
            ValueConverter::EnumToString => ValueKind::String,
            ValueConverter::EnumToNumber(kind) => kind.clone(),
        }
    }
}

/// How a property's values are represented in the database
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    /// Model-side type
    pub clr_type: ClrType,

    /// Store type name (e.g. `nvarchar(max)`)
    pub store_type: String,

    /// Provider-side kind; `ValueKind::Enum` for native database enums
    pub provider_kind: ValueKind,

    /// Conversion applied before storage
    pub converter: Option<ValueConverter>,

    /// Dialect used to render literals; `None` renders plain ANSI SQL
    pub dialect: Option<Dialect>,
}

impl TypeMapping {
    /// Create a mapping whose provider kind equals the scalar kind
    pub fn scalar(kind: ValueKind, store_type: impl Into<String>, dialect: Option<Dialect>) -> Self {
        Self {
            clr_type: ClrType::Scalar(kind.clone()),
            store_type: store_type.into(),
            provider_kind: kind,
            converter: None,
            dialect,
        }
    }

    /// Set the converter
    pub fn with_converter(mut self, converter: ValueConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Model-side scalar kind, `None` for enums
    pub fn clr_kind(&self) -> Option<&ValueKind> {
        self.clr_type.scalar_kind()
    }

    /// Render a provider value as a SQL literal
    pub fn generate_sql_literal(&self, value: &Value) -> String {
        sql_literal(self.dialect, value)
    }

    /// The value stored for an enum member, after conversion.
    ///
    /// Without a converter, integral members are cast to the provider kind so
    /// every member renders with the mapping's literal syntax. Returns `None`
    /// when a numeric conversion does not fit the target kind.
    pub fn provider_value(&self, member: &EnumMember) -> Option<Value> {
        match &self.converter {
            Some(ValueConverter::EnumToString) => Some(Value::String(member.name.clone())),
            Some(ValueConverter::EnumToNumber(kind)) => {
                Value::from_i128(kind, member.value.as_i128()?)
            }
            None if self.provider_kind.is_integral() => {
                Value::from_i128(&self.provider_kind, member.value.as_i128()?)
            }
            None => Some(member.value.clone()),
        }
    }
}
