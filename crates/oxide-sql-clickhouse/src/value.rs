//! Bind values.
//!
//! Every value that reaches the compiled SQL through a placeholder is stored
//! as a [`SqlValue`] in the binding list of the compile result.

use serde::{Deserialize, Serialize};

/// A value bound to a `?` placeholder.
///
/// Deserializes from plain JSON scalars: `null`, booleans, integers, floats
/// and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value that does not fit in `i64`.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    #[serde(skip_deserializing)]
    Blob(Vec<u8>),
    /// A value that was never supplied.
    ///
    /// It still compiles to a placeholder, but marks the compile result so
    /// the caller can refuse to run the statement.
    #[serde(skip_deserializing)]
    Undefined,
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// Only meant for logging and debugging output; statements should be
    /// executed with bindings.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null | Self::Undefined => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("true")
                } else {
                    String::from("false")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::UInt(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("unhex('{hex}')")
            }
        }
    }

    /// Returns `true` for the undefined sentinel.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u64 {
    fn to_sql_value(self) -> SqlValue {
        i64::try_from(self).map_or(SqlValue::UInt(self), SqlValue::Int)
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}
