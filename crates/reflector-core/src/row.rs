//! Catalog row representation.

use crate::Result;
use crate::error::{Error, TypeError};
use crate::value::Value;

/// A single row returned from a catalog statement.
///
/// `SHOW TABLES`, `SHOW INDEX` and `SHOW CREATE TABLE` have a documented
/// column order, so cells are read by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a cell by position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a typed cell by position.
    ///
    /// A missing cell and a cell of the wrong type are both type errors
    /// carrying the position.
    #[allow(clippy::result_large_err)]
    pub fn get_as<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.get(index).ok_or_else(|| {
            Error::Type(TypeError {
                expected: std::any::type_name::<T>(),
                actual: format!("a row of {} cells", self.len()),
                position: Some(index),
            })
        })?;
        T::from_value(value).map_err(|e| match e {
            Error::Type(mut te) => {
                if te.position.is_none() {
                    te.position = Some(index);
                }
                Error::Type(te)
            }
            e => e,
        })
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// Conversion from a catalog cell to a Rust value.
pub trait FromValue: Sized {
    #[allow(clippy::result_large_err)]
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) | Value::Decimal(s) => Ok(s.clone()),
            // Binary collations come back as raw bytes
            Value::Bytes(b) => String::from_utf8(b.clone()).map_err(|_| {
                Error::Type(TypeError {
                    expected: "String",
                    actual: "non-UTF-8 bytes".to_string(),
                    position: None,
                })
            }),
            _ => Err(Error::Type(TypeError {
                expected: "String",
                actual: value.type_name().to_string(),
                position: None,
            })),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
