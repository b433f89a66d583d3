//! The query-execution capability consumed by introspection.
//!
//! This module defines:
//!
//! - [`Cursor`] - a DB-API style handle: execute a statement, fetch its rows,
//!   read the column description of the last result set
//! - [`ColumnDescriptor`] - one entry of that description
//!
//! Cursors are supplied by the caller and bound to one connection. Every
//! call blocks until the server answers; nothing here opens, closes or
//! wraps the connection in a transaction.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// Metadata about one result-set column, independent of any row.
///
/// Mirrors the seven-field DB-API description. Position in the
/// description sequence is the column's 0-based index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name (or alias)
    pub name: String,
    /// Native type code (`MYSQL_TYPE_*` for MySQL drivers)
    pub type_code: u8,
    /// Maximum display width, if reported
    pub display_size: Option<u32>,
    /// Storage length in bytes, if reported
    pub internal_size: Option<u32>,
    /// Numeric precision, if reported
    pub precision: Option<u32>,
    /// Numeric scale / fractional digits, if reported
    pub scale: Option<u32>,
    /// Whether the column accepts NULL
    pub null_ok: bool,
}

impl ColumnDescriptor {
    /// Create a descriptor with only a name and type code.
    pub fn new(name: impl Into<String>, type_code: u8) -> Self {
        Self {
            name: name.into(),
            type_code,
            display_size: None,
            internal_size: None,
            precision: None,
            scale: None,
            null_ok: true,
        }
    }

    #[must_use]
    pub fn null_ok(mut self, null_ok: bool) -> Self {
        self.null_ok = null_ok;
        self
    }

    #[must_use]
    pub fn internal_size(mut self, size: u32) -> Self {
        self.internal_size = Some(size);
        self
    }
}

/// A query-execution handle bound to a target database.
///
/// `execute` runs a statement with `?` placeholders bound to `params`;
/// `fetch_all` drains the rows it produced; `description` reports the
/// columns of the most recent result set, or `None` if the last statement
/// produced none. A description stays valid after `fetch_all` until the
/// next `execute`.
///
/// # Example
///
/// ```rust,ignore
/// cursor.execute("SHOW INDEX FROM `books`", &[])?;
/// for row in cursor.fetch_all()? {
///     // ...
/// }
/// ```
pub trait Cursor {
    /// Execute a statement.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()>;

    /// Fetch all remaining rows of the last result set.
    fn fetch_all(&mut self) -> Result<Vec<Row>>;

    /// Column description of the last result set.
    fn description(&self) -> Option<&[ColumnDescriptor]>;

    /// Execute a statement and return all of its rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.execute(sql, params)?;
        self.fetch_all()
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        (**self).fetch_all()
    }

    fn description(&self) -> Option<&[ColumnDescriptor]> {
        (**self).description()
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShot {
        rows: Vec<Row>,
        description: Option<Vec<ColumnDescriptor>>,
        executed: Vec<String>,
    }

    impl Cursor for OneShot {
        fn execute(&mut self, sql: &str, _params: &[Value]) -> Result<()> {
            self.executed.push(sql.to_string());
            Ok(())
        }

        fn fetch_all(&mut self) -> Result<Vec<Row>> {
            Ok(std::mem::take(&mut self.rows))
        }

        fn description(&self) -> Option<&[ColumnDescriptor]> {
            self.description.as_deref()
        }
    }

    #[test]
    fn query_executes_then_drains() {
        let mut cursor = OneShot {
            rows: vec![Row::new(vec![Value::Text("books".into())])],
            description: Some(vec![ColumnDescriptor::new("Tables_in_db", 0xFD)]),
            executed: Vec::new(),
        };

        let rows = cursor.query("SHOW TABLES", &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(cursor.executed, vec!["SHOW TABLES".to_string()]);
        assert!(cursor.fetch_all().unwrap().is_empty());
        assert_eq!(cursor.description().unwrap()[0].name, "Tables_in_db");
    }

    #[test]
    fn mutable_reference_is_a_cursor() {
        fn run<C: Cursor>(mut c: C) -> usize {
            c.query("SELECT 1", &[]).unwrap().len()
        }

        let mut cursor = OneShot {
            rows: vec![Row::new(vec![Value::Int(1)])],
            description: None,
            executed: Vec::new(),
        };
        assert_eq!(run(&mut cursor), 1);
        assert_eq!(cursor.executed.len(), 1);
    }

    #[test]
    fn descriptor_builder() {
        let col = ColumnDescriptor::new("id", 0x03)
            .null_ok(false)
            .internal_size(11);
        assert_eq!(col.type_code, 0x03);
        assert!(!col.null_ok);
        assert_eq!(col.internal_size, Some(11));
        assert_eq!(col.display_size, None);
    }
}
