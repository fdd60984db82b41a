//! Host services the conventions depend on
//!
//! A host supplies its own type mapping source and SQL generation helper. The
//! dialect-driven defaults below cover the four supported providers and are
//! what the tests run against.

use crate::property::{ClrType, Property};
use crate::type_mapping::TypeMapping;
use checkwright_core::{DatabaseProvider, Dialect, ValueKind};

// ============================================================================
// Traits
// ============================================================================

/// Resolves how properties and scalar kinds are stored
pub trait TypeMappingSource: Send + Sync {
    /// Mapping for a property, or `None` if it cannot be mapped
    fn find_mapping(&self, property: &Property) -> Option<TypeMapping>;

    /// Mapping for a plain scalar kind
    fn find_mapping_for_kind(&self, kind: &ValueKind) -> Option<TypeMapping>;
}

/// Provider-specific SQL text helpers
pub trait SqlGenerationHelper: Send + Sync {
    /// Quote an identifier for embedding in SQL
    fn delimit_identifier(&self, identifier: &str) -> String;
}

// ============================================================================
// Relational Type Mapping Source
// ============================================================================

/// Default type mapping source driven by the dialect table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationalTypeMappingSource {
    dialect: Option<Dialect>,
}

impl RelationalTypeMappingSource {
    /// Create a mapping source for a dialect; `None` renders ANSI SQL
    pub fn new(dialect: Option<Dialect>) -> Self {
        Self { dialect }
    }

    /// Create a mapping source for a provider
    pub fn for_provider(provider: &DatabaseProvider) -> Self {
        Self::new(provider.dialect())
    }

    /// The dialect literals are rendered in
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    fn default_store_type(&self, kind: &ValueKind) -> String {
        use ValueKind::*;

        let name = match (self.dialect, kind) {
            (_, Enum(name)) => return name.clone(),

            (Some(Dialect::SqlServer), Bool) => "bit",
            (Some(Dialect::SqlServer), Int8 | Int16) => "smallint",
            (Some(Dialect::SqlServer), Int32 | UInt16) => "int",
            (Some(Dialect::SqlServer), Int64 | UInt32) => "bigint",
            (Some(Dialect::SqlServer), UInt8) => "tinyint",
            (Some(Dialect::SqlServer), UInt64) => "decimal(20,0)",
            (Some(Dialect::SqlServer), Decimal) => "decimal(18,2)",
            (Some(Dialect::SqlServer), Float32) => "real",
            (Some(Dialect::SqlServer), Float64) => "float",
            (Some(Dialect::SqlServer), String) => "nvarchar(max)",

            (Some(Dialect::Sqlite), Bool | Int8 | Int16 | Int32 | Int64) => "INTEGER",
            (Some(Dialect::Sqlite), UInt8 | UInt16 | UInt32 | UInt64) => "INTEGER",
            (Some(Dialect::Sqlite), Float32 | Float64) => "REAL",
            (Some(Dialect::Sqlite), Decimal | String) => "TEXT",

            (Some(Dialect::PostgreSql), Bool) => "boolean",
            (Some(Dialect::PostgreSql), Int8 | Int16 | UInt8) => "smallint",
            (Some(Dialect::PostgreSql), Int32 | UInt16) => "integer",
            (Some(Dialect::PostgreSql), Int64 | UInt32) => "bigint",
            (Some(Dialect::PostgreSql), UInt64) => "numeric(20,0)",
            (Some(Dialect::PostgreSql), Decimal) => "numeric",
            (Some(Dialect::PostgreSql), Float32) => "real",
            (Some(Dialect::PostgreSql), Float64) => "double precision",
            (Some(Dialect::PostgreSql), String) => "text",

            (Some(Dialect::MySql), Bool) => "tinyint(1)",
            (Some(Dialect::MySql), Int8) => "tinyint",
            (Some(Dialect::MySql), Int16) => "smallint",
            (Some(Dialect::MySql), Int32) => "int",
            (Some(Dialect::MySql), Int64) => "bigint",
            (Some(Dialect::MySql), UInt8) => "tinyint unsigned",
            (Some(Dialect::MySql), UInt16) => "smallint unsigned",
            (Some(Dialect::MySql), UInt32) => "int unsigned",
            (Some(Dialect::MySql), UInt64) => "bigint unsigned",
            (Some(Dialect::MySql), Decimal) => "decimal(65,30)",
            (Some(Dialect::MySql), Float32) => "float",
            (Some(Dialect::MySql), Float64) => "double",
            (Some(Dialect::MySql), String) => "longtext",

            (None, Bool) => "BOOLEAN",
            (None, Int8 | Int16 | UInt8) => "SMALLINT",
            (None, Int32 | UInt16) => "INTEGER",
            (None, Int64 | UInt32) => "BIGINT",
            (None, UInt64 | Decimal) => "DECIMAL",
            (None, Float32) => "REAL",
            (None, Float64) => "DOUBLE PRECISION",
            (None, String) => "VARCHAR",
        };
        name.to_string()
    }
}

impl TypeMappingSource for RelationalTypeMappingSource {
    fn find_mapping(&self, property: &Property) -> Option<TypeMapping> {
        let converter = property.value_converter.clone();

        let provider_kind = match (&property.provider_kind, &converter, &property.clr_type) {
            (Some(kind), _, _) => kind.clone(),
            (None, Some(converter), _) => converter.provider_kind(),
            (None, None, ClrType::Scalar(kind)) => kind.clone(),
            (None, None, ClrType::Enum(enum_type)) => enum_type.underlying.clone(),
        };

        let store_type = property
            .store_type
            .clone()
            .unwrap_or_else(|| self.default_store_type(&provider_kind));

        Some(TypeMapping {
            clr_type: property.clr_type.clone(),
            store_type,
            provider_kind,
            converter,
            dialect: self.dialect,
        })
    }

    fn find_mapping_for_kind(&self, kind: &ValueKind) -> Option<TypeMapping> {
        if kind.is_enum() {
            return None;
        }
        Some(TypeMapping::scalar(
            kind.clone(),
            self.default_store_type(kind),
            self.dialect,
        ))
    }
}

// ============================================================================
// Dialect SQL Generation Helper
// ============================================================================

/// Default SQL generation helper driven by the dialect table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialectSqlGenerationHelper {
    dialect: Option<Dialect>,
}

impl DialectSqlGenerationHelper {
    /// Create a helper for a dialect; `None` uses ANSI double quotes
    pub fn new(dialect: Option<Dialect>) -> Self {
        Self { dialect }
    }

    /// Create a helper for a provider
    pub fn for_provider(provider: &DatabaseProvider) -> Self {
        Self::new(provider.dialect())
    }
}

impl SqlGenerationHelper for DialectSqlGenerationHelper {
    fn delimit_identifier(&self, identifier: &str) -> String {
        match self.dialect {
            Some(dialect) => dialect.delimit_identifier(identifier),
            None => format!("\"{}\"", identifier.replace('"', "\"\"")),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
