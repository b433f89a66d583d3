//! MySQL vocabulary for Reflector.
//!
//! The wire driver is supplied by the host application; this crate holds
//! what any driver needs in order to feed the introspector:
//!
//! - `FieldType` codes and `ColumnDef` to `ColumnDescriptor` conversion
//! - `ServerError` classification into the core error taxonomy
//! - `quote_name` for interpolating identifiers
//!
//! # Example
//!
//! ```rust,ignore
//! use reflector_mysql::{ServerError, quote_name};
//!
//! let sql = format!("SHOW INDEX FROM {}", quote_name("books"));
//! // a driver adapter maps its ERR packet:
//! let err = ServerError::new(1146, "42S02", "Table 'db.books' doesn't exist").into_error(Some(&sql));
//! ```

pub mod error;
pub mod ident;
pub mod types;

pub use error::ServerError;
pub use ident::quote_name;
pub use types::{ColumnDef, FieldType, column_flags};
