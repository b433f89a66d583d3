//! Error types for Reflector operations.

use std::fmt;

/// The primary error type for all introspection operations.
#[derive(Debug)]
pub enum Error {
    /// Query execution errors reported by the cursor
    Query(QueryError),
    /// A table or column name did not resolve against introspected metadata
    Lookup(LookupError),
    /// Type conversion errors while reading catalog rows
    Type(TypeError),
    /// Protocol errors (driver returned something unexpected)
    Protocol(ProtocolError),
    /// Schema mapping errors
    Schema(SchemaError),
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub sql: Option<String>,
    pub sqlstate: Option<String>,
    /// Server error number (MySQL `errno`), when the driver reports one
    pub code: Option<u16>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Syntax error in SQL
    Syntax,
    /// Table, column or database not found
    NotFound,
    /// The server does not implement the requested feature
    Unsupported,
    /// Permission denied
    Permission,
    /// Constraint violation (unique, foreign key, etc.)
    Constraint,
    /// Connection lost or unusable
    Connection,
    /// Other database error
    Database,
}

#[derive(Debug)]
pub struct LookupError {
    pub kind: LookupErrorKind,
    /// Table whose metadata was searched
    pub table: String,
    /// The name that was not found
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    Table,
    Column,
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    /// 0-based position of the offending cell, once known
    pub position: Option<usize>,
}

#[derive(Debug)]
pub struct ProtocolError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// Native type code has no field kind
    UnmappedType,
}

impl Error {
    /// Does this error mean the server lacks the queried feature?
    ///
    /// Only meaningful for catalog queries that have a fallback: a missing
    /// `information_schema` view surfaces as "no such table" or a syntax
    /// error on older servers.
    pub fn is_feature_unavailable(&self) -> bool {
        match self {
            Error::Query(q) => q.is_feature_unavailable(),
            _ => false,
        }
    }

    /// Is this a lookup failure against introspected metadata?
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }

    /// Get SQLSTATE if available (e.g., "42S02" for a missing table)
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sqlstate.as_deref(),
            _ => None,
        }
    }

    /// Get the SQL that caused this error, if available
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sql.as_deref(),
            _ => None,
        }
    }

    /// Attach the failing SQL to a query error that does not carry it yet.
    #[must_use]
    pub fn with_sql(self, sql: &str) -> Self {
        match self {
            Error::Query(mut q) => {
                if q.sql.is_none() {
                    q.sql = Some(sql.to_string());
                }
                Error::Query(q)
            }
            other => other,
        }
    }
}

impl QueryError {
    /// Create a query error of the given kind with no server metadata.
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            sql: None,
            sqlstate: None,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Is this the class of failure that selects a fallback discovery path?
    pub fn is_feature_unavailable(&self) -> bool {
        matches!(
            self.kind,
            QueryErrorKind::Unsupported | QueryErrorKind::Syntax | QueryErrorKind::NotFound
        )
    }
}

impl LookupError {
    pub fn column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::Column,
            table: table.into(),
            name: name.into(),
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: LookupErrorKind::Table,
            table: name.clone(),
            name,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Query(e) => {
                if let Some(sqlstate) = &e.sqlstate {
                    write!(f, "Query error (SQLSTATE {}): {}", sqlstate, e.message)
                } else {
                    write!(f, "Query error: {}", e.message)
                }
            }
            Error::Lookup(e) => write!(f, "Lookup error: {}", e),
            Error::Type(e) => write!(f, "Type error: {}", e),
            Error::Protocol(e) => write!(f, "Protocol error: {}", e.message),
            Error::Schema(e) => write!(f, "Schema error: {}", e.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Query(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Protocol(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sqlstate) = &self.sqlstate {
            write!(f, "{} (SQLSTATE {})", self.message, sqlstate)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LookupErrorKind::Table => write!(f, "no such table '{}'", self.name),
            LookupErrorKind::Column => {
                write!(f, "no column '{}' in table '{}'", self.name, self.table)
            }
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(
                f,
                "expected {} at position {}, found {}",
                self.expected, position, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        Error::Lookup(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Error::Protocol(err)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

/// Result type alias for Reflector operations.
pub type Result<T> = std::result::Result<T, Error>;
