use serde::{Deserialize, Serialize};

use crate::value::{SqlValue, ToSqlValue};

/// A pre-built SQL fragment with its own bindings.
///
/// The fragment is embedded verbatim; its `?` placeholders are the caller's
/// responsibility and must line up with `bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raw {
    /// SQL text.
    pub sql: String,
    /// Values for the placeholders in `sql`, in order.
    #[serde(default)]
    pub bindings: Vec<SqlValue>,
}

impl Raw {
    /// Creates a raw fragment without bindings.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }

    /// Adds a binding for the next placeholder.
    #[must_use]
    pub fn bind<T: ToSqlValue>(mut self, value: T) -> Self {
        self.bindings.push(value.to_sql_value());
        self
    }

    /// Returns `true` when any binding is the undefined sentinel.
    #[must_use]
    pub fn contains_undefined(&self) -> bool {
        self.bindings.iter().any(SqlValue::is_undefined)
    }
}
