//! # Checkwright Core
//!
//! Core types, dialects, and error handling for Checkwright.
//!
//! - **Types**: `ValueKind` and `Value`, the vocabulary shared by the model and the conventions
//! - **Dialects**: provider detection, identifier quoting, literal rendering, and the
//!   per-dialect capability table (length function, regular expression syntax)
//! - **Traits**: `Validatable`
//! - **Errors**: `CheckError` and `CheckResult`

pub mod dialect;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use dialect::{DatabaseProvider, Dialect, DialectCapabilities, RegexTemplate, sql_literal};
pub use error::{CheckError, CheckResult, ResultExt};
pub use traits::Validatable;
pub use types::{Value, ValueKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
