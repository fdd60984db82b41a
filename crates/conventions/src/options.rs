//! Options selecting which check constraints are generated
//!
//! Options are built either in code through the builders or from a TOML
//! string:
//!
//! ```toml
//! enums = true
//! discriminators = true
//!
//! [validation]
//! use_regex = false
//! ```

use crate::patterns;
use checkwright_core::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Validation Options
// ============================================================================

/// Options for constraints derived from validation annotations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationCheckConstraintOptions {
    /// Whether regex-based annotations produce constraints
    pub use_regex: bool,

    /// Phone pattern override
    pub phone_regex: Option<String>,

    /// Credit card pattern override
    pub credit_card_regex: Option<String>,

    /// E-mail address pattern override
    pub email_address_regex: Option<String>,

    /// URL pattern override
    pub url_regex: Option<String>,
}

impl Default for ValidationCheckConstraintOptions {
    fn default() -> Self {
        Self {
            use_regex: true,
            phone_regex: None,
            credit_card_regex: None,
            email_address_regex: None,
            url_regex: None,
        }
    }
}

impl ValidationCheckConstraintOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder
    pub fn builder() -> ValidationCheckConstraintOptionsBuilder {
        ValidationCheckConstraintOptionsBuilder::default()
    }

    /// Effective phone pattern
    pub fn phone_pattern(&self) -> &str {
        self.phone_regex.as_deref().unwrap_or(patterns::DEFAULT_PHONE_REGEX)
    }

    /// Effective credit card pattern
    pub fn credit_card_pattern(&self) -> &str {
        self.credit_card_regex
            .as_deref()
            .unwrap_or(patterns::DEFAULT_CREDIT_CARD_REGEX)
    }

    /// Effective e-mail address pattern
    pub fn email_address_pattern(&self) -> &str {
        self.email_address_regex
            .as_deref()
            .unwrap_or(patterns::DEFAULT_EMAIL_ADDRESS_REGEX)
    }

    /// Effective URL pattern
    pub fn url_pattern(&self) -> &str {
        self.url_regex.as_deref().unwrap_or(patterns::DEFAULT_URL_REGEX)
    }
}

/// Builder for [`ValidationCheckConstraintOptions`]
#[derive(Debug, Clone, Default)]
pub struct ValidationCheckConstraintOptionsBuilder {
    options: ValidationCheckConstraintOptions,
}

impl ValidationCheckConstraintOptionsBuilder {
    /// Enable or disable regex-based constraints
    pub fn use_regex(mut self, use_regex: bool) -> Self {
        self.options.use_regex = use_regex;
        self
    }

    /// Override the phone pattern
    pub fn use_phone_regex(mut self, pattern: impl Into<String>) -> Self {
        self.options.phone_regex = Some(pattern.into());
        self
    }

    /// Override the credit card pattern
    pub fn use_credit_card_regex(mut self, pattern: impl Into<String>) -> Self {
        self.options.credit_card_regex = Some(pattern.into());
        self
    }

    /// Override the e-mail address pattern
    pub fn use_email_regex(mut self, pattern: impl Into<String>) -> Self {
        self.options.email_address_regex = Some(pattern.into());
        self
    }

    /// Override the URL pattern
    pub fn use_url_regex(mut self, pattern: impl Into<String>) -> Self {
        self.options.url_regex = Some(pattern.into());
        self
    }

    /// Finish building
    pub fn build(self) -> ValidationCheckConstraintOptions {
        self.options
    }
}

// ============================================================================
// Check Constraint Options
// ============================================================================

/// Which kinds of check constraints are generated
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConstraintsOptions {
    /// Constrain enum columns to their members
    #[serde(rename = "enums")]
    pub enum_check_constraints: bool,

    /// Constrain discriminator columns to the mapped values
    #[serde(rename = "discriminators")]
    pub discriminator_check_constraints: bool,

    /// Constraints from validation annotations; `None` disables them
    pub validation: Option<ValidationCheckConstraintOptions>,
}

impl CheckConstraintsOptions {
    /// Options with everything disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder
    pub fn builder() -> CheckConstraintsOptionsBuilder {
        CheckConstraintsOptionsBuilder::default()
    }

    /// Parse options from TOML
    pub fn from_toml_str(source: &str) -> CheckResult<Self> {
        let options: Self = toml::from_str(source)?;
        options.check()?;
        Ok(options)
    }

    /// Check if enum constraints are enabled
    pub fn are_enum_check_constraints_enabled(&self) -> bool {
        self.enum_check_constraints
    }

    /// Check if discriminator constraints are enabled
    pub fn are_discriminator_check_constraints_enabled(&self) -> bool {
        self.discriminator_check_constraints
    }

    /// Check if validation constraints are enabled
    pub fn are_validation_check_constraints_enabled(&self) -> bool {
        self.validation.is_some()
    }

    /// Check if any kind of constraint is enabled
    pub fn is_enabled(&self) -> bool {
        self.enum_check_constraints
            || self.discriminator_check_constraints
            || self.validation.is_some()
    }

    /// Reject empty regex overrides
    pub fn check(&self) -> CheckResult<()> {
        let Some(validation) = &self.validation else {
            return Ok(());
        };

        let overrides = [
            ("phone_regex", &validation.phone_regex),
            ("credit_card_regex", &validation.credit_card_regex),
            ("email_address_regex", &validation.email_address_regex),
            ("url_regex", &validation.url_regex),
        ];
        for (name, pattern) in overrides {
            if pattern.as_deref() == Some("") {
                return Err(CheckError::InvalidConfig(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Short description of the enabled constraint kinds, for log lines
    pub fn log_fragment(&self) -> String {
        let mut kinds = Vec::new();
        if self.enum_check_constraints {
            kinds.push("enums");
        }
        if self.discriminator_check_constraints {
            kinds.push("discriminators");
        }
        if self.validation.is_some() {
            kinds.push("validation");
        }
        format!("using check constraints ({})", kinds.join(", "))
    }

    /// Key/value description of the options, for diagnostics
    pub fn debug_info(&self) -> BTreeMap<String, String> {
        let validation = match &self.validation {
            Some(validation) => format!("use_regex={}", validation.use_regex),
            None => "disabled".to_string(),
        };

        BTreeMap::from([
            (
                "CheckConstraints:Enums".to_string(),
                self.enum_check_constraints.to_string(),
            ),
            (
                "CheckConstraints:Discriminators".to_string(),
                self.discriminator_check_constraints.to_string(),
            ),
            ("CheckConstraints:Validation".to_string(), validation),
        ])
    }
}

/// Builder for [`CheckConstraintsOptions`]
#[derive(Debug, Clone, Default)]
pub struct CheckConstraintsOptionsBuilder {
    options: CheckConstraintsOptions,
}

impl CheckConstraintsOptionsBuilder {
    /// Enable enum constraints
    pub fn use_enum_check_constraints(mut self) -> Self {
        self.options.enum_check_constraints = true;
        self
    }

    /// Enable discriminator constraints
    pub fn use_discriminator_check_constraints(mut self) -> Self {
        self.options.discriminator_check_constraints = true;
        self
    }

    /// Enable validation constraints, configured by `configure`
    pub fn use_validation_check_constraints<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ValidationCheckConstraintOptionsBuilder) -> ValidationCheckConstraintOptionsBuilder,
    {
        self.options.validation = Some(configure(ValidationCheckConstraintOptions::builder()).build());
        self
    }

    /// Enable every kind of constraint
    pub fn use_all_check_constraints<F>(self, configure: F) -> Self
    where
        F: FnOnce(ValidationCheckConstraintOptionsBuilder) -> ValidationCheckConstraintOptionsBuilder,
    {
        self.use_enum_check_constraints()
            .use_discriminator_check_constraints()
            .use_validation_check_constraints(configure)
    }

    /// Finish building
    pub fn build(self) -> CheckConstraintsOptions {
        self.options
    }
}

// ============================================================================
// Tests
// ============================================================================
