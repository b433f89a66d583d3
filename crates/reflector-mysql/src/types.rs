//! MySQL type codes and column metadata.
//!
//! This module provides:
//! - MySQL field type constants (`MYSQL_TYPE_*`)
//! - Column definition flags
//! - Conversion of a server column definition into a [`ColumnDescriptor`]

use reflector_core::ColumnDescriptor;
use serde::{Deserialize, Serialize};

/// MySQL field type codes.
///
/// These are the `MYSQL_TYPE_*` constants from the MySQL C API, as carried
/// in the `type_code` of a [`ColumnDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FieldType {
    /// DECIMAL (MYSQL_TYPE_DECIMAL)
    Decimal = 0x00,
    /// TINYINT (MYSQL_TYPE_TINY)
    Tiny = 0x01,
    /// SMALLINT (MYSQL_TYPE_SHORT)
    Short = 0x02,
    /// INT (MYSQL_TYPE_LONG)
    Long = 0x03,
    /// FLOAT (MYSQL_TYPE_FLOAT)
    Float = 0x04,
    /// DOUBLE (MYSQL_TYPE_DOUBLE)
    Double = 0x05,
    /// NULL (MYSQL_TYPE_NULL)
    Null = 0x06,
    /// TIMESTAMP (MYSQL_TYPE_TIMESTAMP)
    Timestamp = 0x07,
    /// BIGINT (MYSQL_TYPE_LONGLONG)
    LongLong = 0x08,
    /// MEDIUMINT (MYSQL_TYPE_INT24)
    Int24 = 0x09,
    /// DATE (MYSQL_TYPE_DATE)
    Date = 0x0A,
    /// TIME (MYSQL_TYPE_TIME)
    Time = 0x0B,
    /// DATETIME (MYSQL_TYPE_DATETIME)
    DateTime = 0x0C,
    /// YEAR (MYSQL_TYPE_YEAR)
    Year = 0x0D,
    /// NEWDATE (MYSQL_TYPE_NEWDATE), server internal
    NewDate = 0x0E,
    /// VARCHAR (MYSQL_TYPE_VARCHAR)
    VarChar = 0x0F,
    /// BIT (MYSQL_TYPE_BIT)
    Bit = 0x10,
    /// JSON (MYSQL_TYPE_JSON), MySQL 5.7.8+
    Json = 0xF5,
    /// NEWDECIMAL (MYSQL_TYPE_NEWDECIMAL), MySQL 5.0.3+
    NewDecimal = 0xF6,
    /// ENUM (MYSQL_TYPE_ENUM)
    Enum = 0xF7,
    /// SET (MYSQL_TYPE_SET)
    Set = 0xF8,
    /// TINYBLOB / TINYTEXT (MYSQL_TYPE_TINY_BLOB)
    TinyBlob = 0xF9,
    /// MEDIUMBLOB / MEDIUMTEXT (MYSQL_TYPE_MEDIUM_BLOB)
    MediumBlob = 0xFA,
    /// LONGBLOB / LONGTEXT (MYSQL_TYPE_LONG_BLOB)
    LongBlob = 0xFB,
    /// BLOB / TEXT (MYSQL_TYPE_BLOB)
    Blob = 0xFC,
    /// VARCHAR / VARBINARY in result sets (MYSQL_TYPE_VAR_STRING)
    VarString = 0xFD,
    /// CHAR / BINARY (MYSQL_TYPE_STRING)
    String = 0xFE,
    /// GEOMETRY (MYSQL_TYPE_GEOMETRY)
    Geometry = 0xFF,
}

impl FieldType {
    /// Parse a field type from its wire code.
    ///
    /// Returns `None` for codes this crate does not know; callers decide
    /// what an unknown column type means for them.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => FieldType::Decimal,
            0x01 => FieldType::Tiny,
            0x02 => FieldType::Short,
            0x03 => FieldType::Long,
            0x04 => FieldType::Float,
            0x05 => FieldType::Double,
            0x06 => FieldType::Null,
            0x07 => FieldType::Timestamp,
            0x08 => FieldType::LongLong,
            0x09 => FieldType::Int24,
            0x0A => FieldType::Date,
            0x0B => FieldType::Time,
            0x0C => FieldType::DateTime,
            0x0D => FieldType::Year,
            0x0E => FieldType::NewDate,
            0x0F => FieldType::VarChar,
            0x10 => FieldType::Bit,
            0xF5 => FieldType::Json,
            0xF6 => FieldType::NewDecimal,
            0xF7 => FieldType::Enum,
            0xF8 => FieldType::Set,
            0xF9 => FieldType::TinyBlob,
            0xFA => FieldType::MediumBlob,
            0xFB => FieldType::LongBlob,
            0xFC => FieldType::Blob,
            0xFD => FieldType::VarString,
            0xFE => FieldType::String,
            0xFF => FieldType::Geometry,
            _ => return None,
        })
    }

    /// The wire code of this type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, FieldType::Decimal | FieldType::NewDecimal)
    }
}

/// Column definition flag bits the description depends on.
pub mod column_flags {
    pub const NOT_NULL: u16 = 1;
    pub const UNSIGNED: u16 = 32;
}

/// Column definition as sent by the server ahead of a result set.
///
/// Drivers that see the raw definition packet can build one of these and
/// hand the introspector its [`to_descriptor`](Self::to_descriptor).
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name (or alias)
    pub name: String,
    /// Column length in bytes
    pub column_length: u32,
    /// Raw type code; unknown codes are kept as-is
    pub type_code: u8,
    /// Column flags
    pub flags: u16,
    /// Number of decimals
    pub decimals: u8,
}

impl ColumnDef {
    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_code(self.type_code)
    }

    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.flags & column_flags::NOT_NULL != 0
    }

    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.flags & column_flags::UNSIGNED != 0
    }

    /// Build the DB-API description entry for this column.
    ///
    /// DECIMAL lengths include the sign and the decimal point, so precision
    /// is recovered by subtracting them.
    #[must_use]
    pub fn to_descriptor(&self) -> ColumnDescriptor {
        let (precision, scale) = match self.field_type() {
            Some(t) if t.is_decimal() => {
                let mut digits = self.column_length;
                if self.decimals > 0 {
                    digits = digits.saturating_sub(1);
                }
                if !self.is_unsigned() {
                    digits = digits.saturating_sub(1);
                }
                (Some(digits), Some(u32::from(self.decimals)))
            }
            _ => (None, None),
        };

        ColumnDescriptor {
            name: self.name.clone(),
            type_code: self.type_code,
            display_size: None,
            internal_size: Some(self.column_length),
            precision,
            scale,
            null_ok: !self.is_not_null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(type_code: u8, flags: u16, column_length: u32, decimals: u8) -> ColumnDef {
        ColumnDef {
            name: "price".to_string(),
            column_length,
            type_code,
            flags,
            decimals,
        }
    }

    #[test]
    fn known_and_unknown_codes() {
        assert_eq!(FieldType::from_code(0x03), Some(FieldType::Long));
        assert_eq!(FieldType::from_code(0xFC), Some(FieldType::Blob));
        assert_eq!(FieldType::from_code(0x42), None);
        assert_eq!(FieldType::VarString.code(), 0xFD);
    }

    #[test]
    fn every_known_code_round_trips() {
        for code in 0..=u8::MAX {
            if let Some(t) = FieldType::from_code(code) {
                assert_eq!(t.code(), code, "{t:?}");
            }
        }
    }

    #[test]
    fn decimal_classification() {
        assert!(FieldType::NewDecimal.is_decimal());
        assert!(FieldType::Decimal.is_decimal());
        assert!(!FieldType::Double.is_decimal());
    }

    #[test]
    fn unsigned_decimal_keeps_sign_digit() {
        // DECIMAL(5,0) UNSIGNED: length 5, no point, no sign
        let def = column(0xF6, column_flags::UNSIGNED, 5, 0);
        assert!(def.is_unsigned());
        assert_eq!(def.to_descriptor().precision, Some(5));
    }

    #[test]
    fn decimal_descriptor() {
        // DECIMAL(10,2) NOT NULL: length 12 = 10 digits + sign + point
        let def = column(0xF6, column_flags::NOT_NULL, 12, 2);
        let desc = def.to_descriptor();
        assert_eq!(desc.type_code, 0xF6);
        assert_eq!(desc.precision, Some(10));
        assert_eq!(desc.scale, Some(2));
        assert!(!desc.null_ok);
        assert_eq!(desc.internal_size, Some(12));
    }

    #[test]
    fn unknown_type_keeps_code() {
        let def = column(0x42, 0, 4, 0);
        assert_eq!(def.field_type(), None);
        let desc = def.to_descriptor();
        assert_eq!(desc.type_code, 0x42);
        assert!(desc.null_ok);
        assert_eq!(desc.precision, None);
    }
}
