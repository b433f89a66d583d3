//! Live MySQL schema introspection.
//!
//! [`Introspector`] reads a database's catalog through a caller-supplied
//! [`Cursor`] and produces the metadata an ORM needs to reverse-engineer
//! models: table names, column descriptors, index flags and foreign-key
//! relations expressed as column positions.

use std::collections::{BTreeMap, HashMap};

use reflector_core::error::{
    LookupError, ProtocolError, QueryErrorKind, SchemaError, SchemaErrorKind,
};
use reflector_core::{ColumnDescriptor, Cursor, Error, Result, Row, Value};
use reflector_mysql::quote_name;
use serde::Serialize;

use crate::definition::scan_foreign_keys;
use crate::options::{ForeignKeyStrategy, IntrospectOptions, UnknownTypePolicy};
use crate::snapshot::{ColumnInfo, DatabaseSchema, TableInfo};
use crate::type_map::{self, FieldKind};

// ============================================================================
// Result Types
// ============================================================================

/// 0-based position of a column in its table's description.
pub type ColumnIndex = usize;

/// The referenced side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyTarget {
    /// Position of the referenced column in the referenced table
    pub column: ColumnIndex,
    /// Referenced table name
    pub table: String,
}

/// Local column index to referenced column, for one table.
pub type Relations = BTreeMap<ColumnIndex, ForeignKeyTarget>;

/// Index membership of a single column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexFlags {
    /// The column belongs to the index named `PRIMARY`
    pub primary_key: bool,
    /// The index is unique
    pub unique: bool,
}

/// Column name to index flags, for one table.
pub type Indexes = BTreeMap<String, IndexFlags>;

/// A foreign-key constraint by name, before positions are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    /// Local column name
    pub column: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

impl ForeignKeyConstraint {
    pub fn new(
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}

/// Where foreign-key constraints were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPath {
    /// `information_schema.key_column_usage`
    InformationSchema,
    /// `SHOW CREATE TABLE` text
    ShowCreateTable,
}

/// Constraints discovered for one table, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDiscovery {
    pub path: DiscoveryPath,
    pub constraints: Vec<ForeignKeyConstraint>,
}

// ============================================================================
// Introspector
// ============================================================================

const FOREIGN_KEYS_SQL: &str = "SELECT column_name, referenced_table_name, referenced_column_name
            FROM information_schema.key_column_usage
            WHERE table_name = ?
                AND table_schema = DATABASE()
                AND referenced_table_name IS NOT NULL
                AND referenced_column_name IS NOT NULL";

/// MySQL schema introspector.
///
/// Holds only options; every call takes the cursor to run against, so one
/// introspector can serve any number of connections. Calls never cache
/// across invocations.
#[derive(Debug, Clone, Default)]
pub struct Introspector {
    options: IntrospectOptions,
}

impl Introspector {
    /// Create an introspector with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: IntrospectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IntrospectOptions {
        &self.options
    }

    /// List all table names in the current database, in server order.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn list_tables<C: Cursor + ?Sized>(&self, cursor: &mut C) -> Result<Vec<String>> {
        let rows = run(cursor, "SHOW TABLES", &[])?;
        let names = rows
            .iter()
            .map(|row| row.get_as::<String>(0))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = names.len(), "Listed tables");
        Ok(names)
    }

    /// Get the column descriptors of a table, in server order.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn describe_table<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<Vec<ColumnDescriptor>> {
        let sql = format!("SELECT * FROM {} LIMIT 1", quote_name(table_name));
        run(cursor, &sql, &[])?;
        let description = cursor.description().ok_or_else(|| {
            Error::Protocol(ProtocolError {
                message: format!("`{}` returned no result set description", sql),
                source: None,
            })
        })?;
        Ok(description.to_vec())
    }

    /// Map each column name of a table to its 0-based position.
    pub fn column_indexes<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<HashMap<String, ColumnIndex>> {
        let description = self.describe_table(cursor, table_name)?;
        Ok(description
            .into_iter()
            .enumerate()
            .map(|(i, col)| (col.name, i))
            .collect())
    }

    /// Column map of a referenced table. A table the server reports as
    /// missing is a lookup error naming it.
    fn referenced_columns<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<HashMap<String, ColumnIndex>> {
        match self.column_indexes(cursor, table_name) {
            Err(Error::Query(q)) if q.kind == QueryErrorKind::NotFound => {
                tracing::debug!(table = table_name, error = %q, "Referenced table missing");
                Err(LookupError::table(table_name).into())
            }
            other => other,
        }
    }

    /// Discover the foreign-key constraints declared on a table.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn foreign_key_constraints<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<ForeignKeyDiscovery> {
        match self.options.foreign_keys {
            ForeignKeyStrategy::InformationSchema => {
                self.constraints_from_information_schema(cursor, table_name)
            }
            ForeignKeyStrategy::ShowCreateTable => {
                self.constraints_from_definition(cursor, table_name)
            }
            ForeignKeyStrategy::Auto => {
                match self.constraints_from_information_schema(cursor, table_name) {
                    Ok(found) => Ok(found),
                    Err(e) if e.is_feature_unavailable() => {
                        tracing::warn!(
                            table = table_name,
                            error = %e,
                            "information_schema unavailable, scanning SHOW CREATE TABLE"
                        );
                        self.constraints_from_definition(cursor, table_name)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    fn constraints_from_information_schema<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<ForeignKeyDiscovery> {
        let rows = run(cursor, FOREIGN_KEYS_SQL, &[Value::from(table_name)])?;
        let constraints = rows
            .iter()
            .map(|row| -> Result<ForeignKeyConstraint> {
                Ok(ForeignKeyConstraint {
                    column: row.get_as(0)?,
                    referenced_table: row.get_as(1)?,
                    referenced_column: row.get_as(2)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForeignKeyDiscovery {
            path: DiscoveryPath::InformationSchema,
            constraints,
        })
    }

    fn constraints_from_definition<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<ForeignKeyDiscovery> {
        let sql = format!("SHOW CREATE TABLE {}", quote_name(table_name));
        let rows = run(cursor, &sql, &[])?;

        let mut constraints = Vec::new();
        for row in &rows {
            let definition: String = row.get_as(1)?;
            constraints.extend(scan_foreign_keys(&definition));
        }

        Ok(ForeignKeyDiscovery {
            path: DiscoveryPath::ShowCreateTable,
            constraints,
        })
    }

    /// Resolve a table's foreign keys into column positions.
    ///
    /// Returns `{local index: (referenced index, referenced table)}`. When a
    /// local column carries several constraints the last one discovered
    /// wins. A referenced table that does not exist, or a name that is not a
    /// column of its table, is a lookup error.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn resolve_foreign_keys<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<Relations> {
        let local = self.column_indexes(cursor, table_name)?;
        let discovery = self.foreign_key_constraints(cursor, table_name)?;

        let mut cache: HashMap<String, HashMap<String, ColumnIndex>> = HashMap::new();
        if self.options.cache_column_maps {
            cache.insert(table_name.to_string(), local.clone());
        }

        let mut relations = Relations::new();
        for fk in discovery.constraints {
            let other_index = if self.options.cache_column_maps {
                if !cache.contains_key(&fk.referenced_table) {
                    let indexes = self.referenced_columns(cursor, &fk.referenced_table)?;
                    cache.insert(fk.referenced_table.clone(), indexes);
                }
                cache
                    .get(&fk.referenced_table)
                    .and_then(|m| m.get(&fk.referenced_column))
                    .copied()
            } else {
                self.referenced_columns(cursor, &fk.referenced_table)?
                    .get(&fk.referenced_column)
                    .copied()
            };
            let other_index = other_index.ok_or_else(|| {
                LookupError::column(fk.referenced_table.as_str(), fk.referenced_column.as_str())
            })?;

            let my_index = *local
                .get(&fk.column)
                .ok_or_else(|| LookupError::column(table_name, fk.column.as_str()))?;

            relations.insert(
                my_index,
                ForeignKeyTarget {
                    column: other_index,
                    table: fk.referenced_table,
                },
            );
        }

        tracing::debug!(
            path = ?discovery.path,
            relations = relations.len(),
            "Resolved foreign keys"
        );
        Ok(relations)
    }

    /// Read primary-key and uniqueness flags per column from `SHOW INDEX`.
    ///
    /// Rows for the same column overwrite earlier ones. Functional index
    /// parts have no column name and are skipped.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn resolve_indexes<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<Indexes> {
        let sql = format!("SHOW INDEX FROM {}", quote_name(table_name));
        let rows = run(cursor, &sql, &[])?;

        // Columns: Table, Non_unique, Key_name, Seq_in_index, Column_name, ...
        let mut indexes = Indexes::new();
        for row in &rows {
            let non_unique = cell(row, 1, &sql)?.is_truthy();
            let key_name: String = row.get_as(2)?;
            let Some(column) = row.get_as::<Option<String>>(4)? else {
                tracing::trace!(index = %key_name, "Skipping expression index part");
                continue;
            };

            indexes.insert(
                column,
                IndexFlags {
                    primary_key: key_name == "PRIMARY",
                    unique: !non_unique,
                },
            );
        }

        Ok(indexes)
    }

    /// Map a native type code to its field kind, applying the unknown-type
    /// policy to codes the type map does not list.
    pub fn type_kind(&self, type_code: u8) -> Result<FieldKind> {
        if let Some(kind) = type_map::lookup(type_code) {
            return Ok(kind);
        }
        match self.options.unknown_types {
            UnknownTypePolicy::Error => Err(Error::Schema(SchemaError {
                kind: SchemaErrorKind::UnmappedType,
                message: format!("no field kind for native type code {:#04x}", type_code),
            })),
            UnknownTypePolicy::Fallback(kind) => {
                tracing::warn!(type_code, fallback = %kind, "Unmapped native type code");
                Ok(kind)
            }
        }
    }

    /// Introspect one table: columns with field kinds, relations, indexes.
    #[tracing::instrument(level = "debug", skip(self, cursor))]
    pub fn table_info<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table_name: &str,
    ) -> Result<TableInfo> {
        let columns = self
            .describe_table(cursor, table_name)?
            .into_iter()
            .map(|descriptor| -> Result<ColumnInfo> {
                let kind = self.type_kind(descriptor.type_code)?;
                Ok(ColumnInfo { descriptor, kind })
            })
            .collect::<Result<Vec<_>>>()?;
        let relations = self.resolve_foreign_keys(cursor, table_name)?;
        let indexes = self.resolve_indexes(cursor, table_name)?;

        Ok(TableInfo {
            name: table_name.to_string(),
            columns,
            relations,
            indexes,
        })
    }

    /// Introspect every table of the current database.
    #[tracing::instrument(level = "info", skip(self, cursor))]
    pub fn introspect_all<C: Cursor + ?Sized>(&self, cursor: &mut C) -> Result<DatabaseSchema> {
        let names = self.list_tables(cursor)?;
        let mut schema = DatabaseSchema::default();
        for name in names {
            let info = self.table_info(cursor, &name)?;
            schema.tables.push(info);
        }
        tracing::info!(tables = schema.tables.len(), "Introspected database");
        Ok(schema)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Execute and drain, tagging failures with the statement.
fn run<C: Cursor + ?Sized>(cursor: &mut C, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
    tracing::trace!(sql = %sql, "Executing catalog query");
    cursor.query(sql, params).map_err(|e| e.with_sql(sql))
}

fn cell<'r>(row: &'r Row, index: usize, sql: &str) -> Result<&'r Value> {
    row.get(index).ok_or_else(|| {
        Error::Protocol(ProtocolError {
            message: format!(
                "`{}` returned a row with {} columns, expected more than {}",
                sql,
                row.len(),
                index
            ),
            source: None,
        })
    })
}
