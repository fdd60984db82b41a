//! # Checkwright IR
//!
//! The in-memory model description the check constraint conventions read and
//! annotate.
//!
//! ## Core Concepts
//!
//! - **Model**: the entity types, in model order, with their inheritance links
//! - **EntityType**: a type mapped to a table (or view), owning its declared
//!   properties and the check constraints registered on it
//! - **Property**: a column-backed property with its type, column names, and
//!   declared validation annotations
//! - **TypeMapping**: how a property's values are stored and rendered as SQL
//! - **Services**: the host seams (`TypeMappingSource`, `SqlGenerationHelper`)
//!

pub mod annotation;
pub mod entity;
pub mod model;
pub mod property;
pub mod serialization;
pub mod services;
pub mod store;
pub mod type_mapping;

pub use annotation::Annotation;
pub use entity::{CheckConstraint, ContainedProperty, DiscriminatorMapping, EntityType};
pub use model::Model;
pub use property::{ClrType, ComplexProperty, ComplexType, EnumMember, EnumType, Property};
pub use serialization::{
    ModelDocument, load_model_from_string, save_model_to_compact_string, save_model_to_string,
};
pub use services::{
    DialectSqlGenerationHelper, RelationalTypeMappingSource, SqlGenerationHelper,
    TypeMappingSource,
};
pub use store::{StoreObjectIdentifier, StoreObjectType};
pub use type_mapping::{TypeMapping, ValueConverter};

// Re-export core types that are commonly used with the model
pub use checkwright_core::{
    CheckError, CheckResult, DatabaseProvider, Dialect, Validatable, Value, ValueKind,
};

/// Current format version of serialized model documents
pub const FORMAT_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
