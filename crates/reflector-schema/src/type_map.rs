//! Native MySQL type code to abstract field kind.
//!
//! The table is built once per process and never changes. Codes it does
//! not list have no kind; [`Introspector::type_kind`] applies the configured
//! [`UnknownTypePolicy`] to them.
//!
//! [`Introspector::type_kind`]: crate::Introspector::type_kind
//! [`UnknownTypePolicy`]: crate::UnknownTypePolicy

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use reflector_mysql::FieldType;
use serde::{Serialize, Serializer};

/// Abstract field kind an ORM model field is generated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    Decimal,
    Char,
    Text,
    Date,
    DateTime,
    Time,
}

impl FieldKind {
    /// The ORM field class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Integer => "IntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Decimal => "DecimalField",
            FieldKind::Char => "CharField",
            FieldKind::Text => "TextField",
            FieldKind::Date => "DateField",
            FieldKind::DateTime => "DateTimeField",
            FieldKind::Time => "TimeField",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reverse type mapping, in declaration order.
///
/// The base entries follow the long-standing MySQLdb reverse map. Four
/// entries go beyond it: `NEWDECIMAL`, `VARCHAR`, `YEAR` and `TIME`, which
/// are what current servers report for DECIMAL, VARCHAR, YEAR and TIME
/// columns. `TIME` gets its own [`FieldKind::Time`] instead of staying
/// unmapped.
pub const DATA_TYPES_REVERSE: &[(FieldType, FieldKind)] = &[
    (FieldType::Blob, FieldKind::Text),
    (FieldType::String, FieldKind::Char),
    (FieldType::Decimal, FieldKind::Decimal),
    (FieldType::NewDecimal, FieldKind::Decimal),
    (FieldType::Date, FieldKind::Date),
    (FieldType::DateTime, FieldKind::DateTime),
    (FieldType::Double, FieldKind::Float),
    (FieldType::Float, FieldKind::Float),
    (FieldType::Int24, FieldKind::Integer),
    (FieldType::Long, FieldKind::Integer),
    (FieldType::LongLong, FieldKind::Integer),
    (FieldType::Short, FieldKind::Integer),
    (FieldType::Tiny, FieldKind::Integer),
    (FieldType::Year, FieldKind::Integer),
    (FieldType::Time, FieldKind::Time),
    (FieldType::Timestamp, FieldKind::DateTime),
    (FieldType::TinyBlob, FieldKind::Text),
    (FieldType::MediumBlob, FieldKind::Text),
    (FieldType::LongBlob, FieldKind::Text),
    (FieldType::VarString, FieldKind::Char),
    (FieldType::VarChar, FieldKind::Char),
];

fn table() -> &'static HashMap<u8, FieldKind> {
    static TABLE: OnceLock<HashMap<u8, FieldKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        DATA_TYPES_REVERSE
            .iter()
            .map(|(ty, kind)| (ty.code(), *kind))
            .collect()
    })
}

/// Look up the field kind for a native type code.
pub fn lookup(type_code: u8) -> Option<FieldKind> {
    table().get(&type_code).copied()
}
