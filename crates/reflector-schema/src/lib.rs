//! Live MySQL schema introspection for Reflector.
//!
//! `reflector-schema` reverse-engineers an existing database into the
//! metadata an ORM generates models from:
//!
//! - table names (`SHOW TABLES`)
//! - column descriptors, whose order defines column positions
//! - foreign keys as `{local position: (referenced position, table)}`,
//!   read from `information_schema` with a `SHOW CREATE TABLE` fallback
//! - primary-key and uniqueness flags per column (`SHOW INDEX`)
//! - native type code to field kind mapping
//!
//! # Example
//!
//! ```rust,ignore
//! use reflector_schema::Introspector;
//!
//! let introspector = Introspector::new();
//! for table in introspector.list_tables(&mut cursor)? {
//!     let relations = introspector.resolve_foreign_keys(&mut cursor, &table)?;
//!     let indexes = introspector.resolve_indexes(&mut cursor, &table)?;
//! }
//! ```

pub mod definition;
pub mod introspect;
pub mod options;
pub mod snapshot;
pub mod type_map;

pub use definition::scan_foreign_keys;
pub use introspect::{
    ColumnIndex, DiscoveryPath, ForeignKeyConstraint, ForeignKeyDiscovery, ForeignKeyTarget,
    IndexFlags, Indexes, Introspector, Relations,
};
pub use options::{ForeignKeyStrategy, IntrospectOptions, UnknownTypePolicy};
pub use snapshot::{ColumnInfo, DatabaseSchema, TableInfo};
pub use type_map::{DATA_TYPES_REVERSE, FieldKind};
