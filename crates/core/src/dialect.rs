//! Database dialects and their capability table
//!
//! Provider differences (identifier quoting, literal syntax, the string length
//! function, and how a regular expression match is spelled) are collected here
//! so that adding a dialect touches a single table instead of every convention.

use crate::types::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provider name reported by the SQL Server provider
pub const SQL_SERVER_PROVIDER_NAME: &str = "Microsoft.EntityFrameworkCore.SqlServer";

/// Provider name reported by the SQLite provider
pub const SQLITE_PROVIDER_NAME: &str = "Microsoft.EntityFrameworkCore.Sqlite";

/// Provider name reported by the PostgreSQL provider
pub const POSTGRESQL_PROVIDER_NAME: &str = "Npgsql.EntityFrameworkCore.PostgreSQL";

/// Provider name reported by the MySQL provider
pub const MYSQL_PROVIDER_NAME: &str = "Pomelo.EntityFrameworkCore.MySql";

/// First SQL Server compatibility level with a native `REGEXP_LIKE`
pub const SQL_SERVER_NATIVE_REGEX_COMPATIBILITY_LEVEL: u32 = 170;

// ============================================================================
// Dialect
// ============================================================================

/// SQL dialects with known constraint capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    SqlServer,
    Sqlite,
    PostgreSql,
    MySql,
}

impl Dialect {
    /// Resolve a provider name to a dialect
    pub fn from_provider_name(name: &str) -> Option<Self> {
        match name {
            SQL_SERVER_PROVIDER_NAME => Some(Dialect::SqlServer),
            SQLITE_PROVIDER_NAME => Some(Dialect::Sqlite),
            POSTGRESQL_PROVIDER_NAME => Some(Dialect::PostgreSql),
            MYSQL_PROVIDER_NAME => Some(Dialect::MySql),
            _ => None,
        }
    }

    /// Get the provider name for this dialect
    pub fn provider_name(&self) -> &'static str {
        match self {
            Dialect::SqlServer => SQL_SERVER_PROVIDER_NAME,
            Dialect::Sqlite => SQLITE_PROVIDER_NAME,
            Dialect::PostgreSql => POSTGRESQL_PROVIDER_NAME,
            Dialect::MySql => MYSQL_PROVIDER_NAME,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::SqlServer => "SQL Server",
            Dialect::Sqlite => "SQLite",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MySql => "MySQL",
        }
    }

    /// Get all dialects
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::SqlServer,
            Dialect::Sqlite,
            Dialect::PostgreSql,
            Dialect::MySql,
        ]
    }

    /// Capabilities of this dialect.
    ///
    /// `compatibility_level` only matters for SQL Server, where level 170 and
    /// above ships a native regular expression function.
    pub fn capabilities(&self, compatibility_level: Option<u32>) -> DialectCapabilities {
        match self {
            Dialect::SqlServer => DialectCapabilities {
                length_function: Some("LEN"),
                regex: Some(
                    if compatibility_level
                        .is_some_and(|level| level >= SQL_SERVER_NATIVE_REGEX_COMPATIBILITY_LEVEL)
                    {
                        RegexTemplate::NativeFunction("REGEXP_LIKE")
                    } else {
                        // Requires a user-installed CLR function
                        RegexTemplate::UserFunction("dbo.RegexMatch")
                    },
                ),
            },
            Dialect::Sqlite => DialectCapabilities {
                length_function: Some("LENGTH"),
                regex: Some(RegexTemplate::Operator("REGEXP")),
            },
            Dialect::PostgreSql => DialectCapabilities {
                length_function: Some("LENGTH"),
                regex: Some(RegexTemplate::Operator("~")),
            },
            Dialect::MySql => DialectCapabilities {
                length_function: Some("LENGTH"),
                regex: Some(RegexTemplate::Operator("REGEXP")),
            },
        }
    }

    /// Quote an identifier, escaping the closing delimiter
    pub fn delimit_identifier(&self, identifier: &str) -> String {
        match self {
            Dialect::SqlServer => format!("[{}]", identifier.replace(']', "]]")),
            Dialect::Sqlite | Dialect::PostgreSql => {
                format!("\"{}\"", identifier.replace('"', "\"\""))
            }
            Dialect::MySql => format!("`{}`", identifier.replace('`', "``")),
        }
    }

    /// Render a value as a SQL literal in this dialect
    pub fn sql_literal(&self, value: &Value) -> String {
        sql_literal(Some(*self), value)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Render a value as a SQL literal.
///
/// With no dialect the output is plain ANSI SQL.
pub fn sql_literal(dialect: Option<Dialect>, value: &Value) -> String {
    let sql_server = dialect == Some(Dialect::SqlServer);
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(v) => match dialect {
            Some(Dialect::SqlServer) => format!("CAST({} AS bit)", u8::from(*v)),
            Some(Dialect::Sqlite) => u8::from(*v).to_string(),
            _ => if *v { "TRUE" } else { "FALSE" }.to_string(),
        },
        Value::UInt8(v) if sql_server => format!("CAST({} AS tinyint)", v),
        Value::Int8(v) if sql_server => format!("CAST({} AS smallint)", v),
        Value::Int16(v) if sql_server => format!("CAST({} AS smallint)", v),
        Value::Int64(v) if sql_server => format!("CAST({} AS bigint)", v),
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::UInt8(v) => v.to_string(),
        Value::UInt16(v) => v.to_string(),
        Value::UInt32(v) => v.to_string(),
        Value::UInt64(v) => v.to_string(),
        Value::Decimal(v) => decimal_literal(v),
        Value::Float32(v) => format!("{:?}", v),
        Value::Float64(v) => format!("{:?}", v),
        Value::String(v) => {
            let escaped = v.replace('\'', "''");
            if sql_server {
                format!("N'{}'", escaped)
            } else {
                format!("'{}'", escaped)
            }
        }
    }
}

/// Decimal literals always carry a fractional digit
fn decimal_literal(value: &Decimal) -> String {
    if value.scale() == 0 {
        format!("{}.0", value)
    } else {
        value.to_string()
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// What a dialect can express inside a check constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialectCapabilities {
    /// Function returning the character length of a string column
    pub length_function: Option<&'static str>,

    /// How a regular expression match is written
    pub regex: Option<RegexTemplate>,
}

impl DialectCapabilities {
    /// Check if regular expression constraints can be rendered
    pub fn supports_regex(&self) -> bool {
        self.regex.is_some()
    }
}

/// The SQL shape of a regular expression match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexTemplate {
    /// A user-provided scalar function taking `(pattern, column)` and returning a match count
    UserFunction(&'static str),
    /// A built-in function taking `(column, pattern)`
    NativeFunction(&'static str),
    /// A binary operator `column OP pattern`
    Operator(&'static str),
}

impl RegexTemplate {
    /// Render a match of `column` (already delimited) against `pattern`.
    ///
    /// The pattern is embedded verbatim between single quotes and must not
    /// contain a single quote.
    pub fn render(&self, column: &str, pattern: &str) -> String {
        match self {
            RegexTemplate::UserFunction(function) => {
                format!("{}('{}', {}) > 0", function, pattern, column)
            }
            RegexTemplate::NativeFunction(function) => {
                format!("{} ({}, '{}')", function, column, pattern)
            }
            RegexTemplate::Operator(op) => format!("{} {} '{}'", column, op, pattern),
        }
    }
}

// ============================================================================
// Database Provider
// ============================================================================

/// The database provider a model is being finalized for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseProvider {
    /// Provider name as reported by the host
    pub name: String,

    /// SQL Server compatibility level, when known
    #[serde(default)]
    pub compatibility_level: Option<u32>,
}

impl DatabaseProvider {
    /// Create a provider from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compatibility_level: None,
        }
    }

    /// SQL Server provider
    pub fn sql_server() -> Self {
        Dialect::SqlServer.into()
    }

    /// SQLite provider
    pub fn sqlite() -> Self {
        Dialect::Sqlite.into()
    }

    /// PostgreSQL provider
    pub fn postgresql() -> Self {
        Dialect::PostgreSql.into()
    }

    /// MySQL provider
    pub fn mysql() -> Self {
        Dialect::MySql.into()
    }

    /// Set the compatibility level
    pub fn with_compatibility_level(mut self, level: u32) -> Self {
        self.compatibility_level = Some(level);
        self
    }

    /// The dialect for this provider, if it is one of the supported ones
    pub fn dialect(&self) -> Option<Dialect> {
        Dialect::from_provider_name(&self.name)
    }

    /// Capabilities of this provider; unknown providers have none
    pub fn capabilities(&self) -> DialectCapabilities {
        self.dialect()
            .map(|dialect| dialect.capabilities(self.compatibility_level))
            .unwrap_or_default()
    }
}

impl From<Dialect> for DatabaseProvider {
    fn from(dialect: Dialect) -> Self {
        Self::new(dialect.provider_name())
    }
}

impl std::fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Tests
// ============================================================================
