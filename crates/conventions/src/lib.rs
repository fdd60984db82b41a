//! # Checkwright Conventions
//!
//! Model finalizing conventions that synthesize SQL `CHECK` constraints:
//!
//! - [`EnumCheckConstraintConvention`]: enum columns limited to their members
//! - [`DiscriminatorCheckConstraintConvention`]: discriminator columns limited
//!   to the hierarchy's mapped values
//! - [`ValidationCheckConstraintConvention`]: range, length, value-list and
//!   format annotations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkwright_conventions::{
//!     CheckConstraintsConventionSetPlugin, CheckConstraintsOptions, ConventionSet,
//! };
//! use checkwright_core::DatabaseProvider;
//!
//! let options = CheckConstraintsOptions::builder()
//!     .use_all_check_constraints(|v| v.use_regex(false))
//!     .build();
//! let plugin = CheckConstraintsConventionSetPlugin::for_provider(options, DatabaseProvider::sql_server());
//!
//! plugin.modify_conventions(ConventionSet::new()).finalize(&mut model)?;
//! ```

pub mod contiguous;
pub mod convention;
pub mod discriminator;
pub mod enum_constraint;
pub mod options;
pub mod patterns;
pub mod plugin;
pub mod validation;

pub use contiguous::contiguous_bounds;
pub use convention::{ConventionSet, ModelFinalizingConvention, PendingConstraint};
pub use discriminator::DiscriminatorCheckConstraintConvention;
pub use enum_constraint::EnumCheckConstraintConvention;
pub use options::{
    CheckConstraintsOptions, CheckConstraintsOptionsBuilder, ValidationCheckConstraintOptions,
    ValidationCheckConstraintOptionsBuilder,
};
pub use patterns::{
    DEFAULT_CREDIT_CARD_REGEX, DEFAULT_EMAIL_ADDRESS_REGEX, DEFAULT_PHONE_REGEX, DEFAULT_URL_REGEX,
};
pub use plugin::CheckConstraintsConventionSetPlugin;
pub use validation::ValidationCheckConstraintConvention;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
