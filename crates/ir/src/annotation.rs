//! Declared validation annotations
//!
//! Annotations are attached to properties by the host when it builds the
//! model. They form a closed set: anything the conventions do not understand
//! is simply never constructed.

use checkwright_core::Value;
use serde::{Deserialize, Serialize};

/// A validation annotation declared on a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// Numeric bounds, each inclusive unless flagged exclusive
    Range {
        minimum: Value,
        maximum: Value,
        #[serde(default)]
        minimum_is_exclusive: bool,
        #[serde(default)]
        maximum_is_exclusive: bool,
    },

    /// Minimum string length
    MinLength(usize),

    /// Maximum string length; drives the column width, never a constraint
    MaxLength(usize),

    /// Maximum string length with an optional minimum
    StringLength {
        maximum_length: usize,
        #[serde(default)]
        minimum_length: usize,
    },

    /// Minimum and maximum string length
    Length {
        minimum_length: usize,
        maximum_length: usize,
    },

    /// Value is required; on strings, empty values are rejected unless allowed
    Required {
        #[serde(default)]
        allow_empty_strings: bool,
    },

    /// Only the listed values are accepted
    AllowedValues(Vec<Value>),

    /// The listed values are rejected
    DeniedValues(Vec<Value>),

    /// Phone number
    Phone,

    /// Credit card number
    CreditCard,

    /// E-mail address
    EmailAddress,

    /// Absolute http, https or ftp URL
    Url,

    /// Custom regular expression
    RegularExpression { pattern: String },
}

impl Annotation {
    /// Inclusive range
    pub fn range(minimum: impl Into<Value>, maximum: impl Into<Value>) -> Self {
        Annotation::Range {
            minimum: minimum.into(),
            maximum: maximum.into(),
            minimum_is_exclusive: false,
            maximum_is_exclusive: false,
        }
    }

    /// Range with explicit exclusivity flags
    pub fn range_with(
        minimum: impl Into<Value>,
        maximum: impl Into<Value>,
        minimum_is_exclusive: bool,
        maximum_is_exclusive: bool,
    ) -> Self {
        Annotation::Range {
            minimum: minimum.into(),
            maximum: maximum.into(),
            minimum_is_exclusive,
            maximum_is_exclusive,
        }
    }

    /// String length with a maximum and a minimum
    pub fn string_length(maximum_length: usize, minimum_length: usize) -> Self {
        Annotation::StringLength {
            maximum_length,
            minimum_length,
        }
    }

    /// Length bounds
    pub fn length(minimum_length: usize, maximum_length: usize) -> Self {
        Annotation::Length {
            minimum_length,
            maximum_length,
        }
    }

    /// Required, rejecting empty strings
    pub fn required() -> Self {
        Annotation::Required {
            allow_empty_strings: false,
        }
    }

    /// Required, accepting empty strings
    pub fn required_allow_empty() -> Self {
        Annotation::Required {
            allow_empty_strings: true,
        }
    }

    /// Allowed values
    pub fn allowed_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Annotation::AllowedValues(values.into_iter().map(Into::into).collect())
    }

    /// Denied values
    pub fn denied_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Annotation::DeniedValues(values.into_iter().map(Into::into).collect())
    }

    /// Custom regular expression
    pub fn regular_expression(pattern: impl Into<String>) -> Self {
        Annotation::RegularExpression {
            pattern: pattern.into(),
        }
    }

    /// Short name of the annotation, as used in constraint names
    pub fn name(&self) -> &'static str {
        match self {
            Annotation::Range { .. } => "Range",
            Annotation::MinLength(_) => "MinLength",
            Annotation::MaxLength(_) => "MaxLength",
            Annotation::StringLength { .. } => "StringLength",
            Annotation::Length { .. } => "Length",
            Annotation::Required { .. } => "Required",
            Annotation::AllowedValues(_) => "AllowedValues",
            Annotation::DeniedValues(_) => "DeniedValues",
            Annotation::Phone => "Phone",
            Annotation::CreditCard => "CreditCard",
            Annotation::EmailAddress => "EmailAddress",
            Annotation::Url => "Url",
            Annotation::RegularExpression { .. } => "RegularExpression",
        }
    }

    /// Check if this annotation is matched with a regular expression
    pub fn is_regex(&self) -> bool {
        matches!(
            self,
            Annotation::Phone
                | Annotation::CreditCard
                | Annotation::EmailAddress
                | Annotation::Url
                | Annotation::RegularExpression { .. }
        )
    }
}
