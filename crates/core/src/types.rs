//! Core value types used throughout Checkwright
//!
//! `ValueKind` describes the runtime kind of a model or provider value, and
//! `Value` carries a concrete value of one of those kinds. Annotation bounds,
//! enum member values, and discriminator values are all expressed as `Value`s,
//! which lets the conventions compare kinds exactly instead of guessing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Kinds
// ============================================================================

/// Runtime kind of a model-side or provider-side value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Boolean true/false
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// Fixed-point decimal
    Decimal,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Character string
    String,
    /// A named enumeration type native to the database provider
    Enum(String),
}

impl ValueKind {
    /// Integral kinds eligible for a `BETWEEN` range over enum values
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ValueKind::Int8
                | ValueKind::Int16
                | ValueKind::Int32
                | ValueKind::Int64
                | ValueKind::UInt8
                | ValueKind::UInt16
                | ValueKind::UInt32
                | ValueKind::UInt64
                | ValueKind::Decimal
        )
    }

    /// Check if this kind is a character string
    pub fn is_string(&self) -> bool {
        matches!(self, ValueKind::String)
    }

    /// Check if this kind is a provider-native enumeration
    pub fn is_enum(&self) -> bool {
        matches!(self, ValueKind::Enum(_))
    }

    /// Get a user-friendly display name
    pub fn display_name(&self) -> String {
        match self {
            ValueKind::Bool => "bool".to_string(),
            ValueKind::Int8 => "i8".to_string(),
            ValueKind::Int16 => "i16".to_string(),
            ValueKind::Int32 => "i32".to_string(),
            ValueKind::Int64 => "i64".to_string(),
            ValueKind::UInt8 => "u8".to_string(),
            ValueKind::UInt16 => "u16".to_string(),
            ValueKind::UInt32 => "u32".to_string(),
            ValueKind::UInt64 => "u64".to_string(),
            ValueKind::Decimal => "decimal".to_string(),
            ValueKind::Float32 => "f32".to_string(),
            ValueKind::Float64 => "f64".to_string(),
            ValueKind::String => "string".to_string(),
            ValueKind::Enum(name) => format!("enum<{}>", name),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Values
// ============================================================================

/// A concrete value attached to the model (annotation bound, enum member,
/// discriminator, allowed value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Decimal(Decimal),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl Value {
    /// The runtime kind of this value; `None` for `Null`
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Value::Null => return None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int8(_) => ValueKind::Int8,
            Value::Int16(_) => ValueKind::Int16,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::UInt8(_) => ValueKind::UInt8,
            Value::UInt16(_) => ValueKind::UInt16,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::String(_) => ValueKind::String,
        };
        Some(kind)
    }

    /// Check if this value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value has exactly the given kind
    pub fn is_kind(&self, kind: &ValueKind) -> bool {
        self.kind().as_ref() == Some(kind)
    }

    /// Check if this value can be written as a SQL literal; false only for
    /// infinite or NaN floats
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Float32(v) => v.is_finite(),
            Value::Float64(v) => v.is_finite(),
            _ => true,
        }
    }

    /// Widen an integral value to `i128`.
    ///
    /// Decimals qualify only when they have no fractional part.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int8(v) => Some(i128::from(*v)),
            Value::Int16(v) => Some(i128::from(*v)),
            Value::Int32(v) => Some(i128::from(*v)),
            Value::Int64(v) => Some(i128::from(*v)),
            Value::UInt8(v) => Some(i128::from(*v)),
            Value::UInt16(v) => Some(i128::from(*v)),
            Value::UInt32(v) => Some(i128::from(*v)),
            Value::UInt64(v) => Some(i128::from(*v)),
            Value::Decimal(d) if d.fract().is_zero() => d.to_i128(),
            _ => None,
        }
    }

    /// Build an integral value of `kind` from an `i128`, if it fits
    pub fn from_i128(kind: &ValueKind, n: i128) -> Option<Value> {
        let value = match kind {
            ValueKind::Int8 => Value::Int8(i8::try_from(n).ok()?),
            ValueKind::Int16 => Value::Int16(i16::try_from(n).ok()?),
            ValueKind::Int32 => Value::Int32(i32::try_from(n).ok()?),
            ValueKind::Int64 => Value::Int64(i64::try_from(n).ok()?),
            ValueKind::UInt8 => Value::UInt8(u8::try_from(n).ok()?),
            ValueKind::UInt16 => Value::UInt16(u16::try_from(n).ok()?),
            ValueKind::UInt32 => Value::UInt32(u32::try_from(n).ok()?),
            ValueKind::UInt64 => Value::UInt64(u64::try_from(n).ok()?),
            ValueKind::Decimal => Value::Decimal(Decimal::try_from_i128_with_scale(n, 0).ok()?),
            _ => return None,
        };
        Some(value)
    }

    /// Get the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{:?}", v),
            Value::Float64(v) => write!(f, "{:?}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Tests
// ============================================================================
