//! Whole-database introspection snapshots.

use reflector_core::ColumnDescriptor;
use serde::Serialize;

use crate::introspect::{Indexes, Relations};
use crate::type_map::FieldKind;

/// Everything introspected about the tables of one database.
///
/// Tables keep the order `SHOW TABLES` returned them in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseSchema {
    pub tables: Vec<TableInfo>,
}

impl DatabaseSchema {
    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

/// One table: described columns, relations keyed by column position, and
/// index flags keyed by column name.
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub relations: Relations,
    pub indexes: Indexes,
}

impl TableInfo {
    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.descriptor.name == name)
    }

    /// Names of the columns flagged as part of the primary key.
    pub fn primary_key(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.descriptor.name.as_str())
            .filter(|name| self.indexes.get(*name).is_some_and(|f| f.primary_key))
            .collect()
    }
}

/// A described column with its field kind.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    #[serde(flatten)]
    pub descriptor: ColumnDescriptor,
    pub kind: FieldKind,
}
