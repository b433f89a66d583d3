//! Core types and traits for Reflector.
//!
//! This crate provides the foundations shared by the MySQL vocabulary and
//! the schema introspector:
//!
//! - `Cursor` trait, the query-execution capability introspection consumes
//! - `ColumnDescriptor` for result-set column metadata
//! - `Row` and `Value` for catalog query results
//! - `Error` taxonomy distinguishing query, lookup and mapping failures

pub mod cursor;
pub mod error;
pub mod row;
pub mod value;

pub use cursor::{ColumnDescriptor, Cursor};
pub use error::{
    Error, LookupError, LookupErrorKind, ProtocolError, QueryError, QueryErrorKind, Result,
    SchemaError, SchemaErrorKind, TypeError,
};
pub use row::{FromValue, Row};
pub use value::Value;
