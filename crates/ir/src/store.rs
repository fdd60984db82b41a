//! Store objects (tables and views) that properties map to

use serde::{Deserialize, Serialize};

/// Kind of store object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreObjectType {
    Table,
    View,
}

/// Identifies a table or view by name and optional schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreObjectIdentifier {
    pub store_object_type: StoreObjectType,
    pub name: String,
    pub schema: Option<String>,
}

impl StoreObjectIdentifier {
    /// Identify a table
    pub fn table(name: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            store_object_type: StoreObjectType::Table,
            name: name.into(),
            schema,
        }
    }

    /// Identify a view
    pub fn view(name: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            store_object_type: StoreObjectType::View,
            name: name.into(),
            schema,
        }
    }

    /// Schema-qualified display name
    pub fn display_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for StoreObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
