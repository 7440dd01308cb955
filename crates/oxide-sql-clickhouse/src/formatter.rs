//! Identifier quoting, placeholders and raw fragment resolution.
//!
//! One [`Formatter`] lives for exactly one compilation and owns that
//! compilation's binding list.

use crate::clause::{Columns, InValues, Operand, Raw};
use crate::dialect::Dialect;
use crate::error::{CompileError, Result};
use crate::value::SqlValue;

/// Renders identifiers and values for a single compilation.
pub struct Formatter<'a> {
    dialect: &'a dyn Dialect,
    bindings: Vec<SqlValue>,
}

impl<'a> Formatter<'a> {
    /// Creates a formatter with an empty binding list.
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            bindings: Vec::new(),
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Quotes an identifier.
    ///
    /// Dotted names are quoted per segment and `name as alias` quotes both
    /// sides.
    #[must_use]
    pub fn wrap(&self, identifier: &str) -> String {
        let trimmed = identifier.trim();
        if let Some((name, alias)) = split_alias(trimmed) {
            return format!("{} as {}", self.wrap(name), self.wrap_segments(alias));
        }
        self.wrap_segments(trimmed)
    }

    fn wrap_segments(&self, identifier: &str) -> String {
        identifier
            .split('.')
            .map(|segment| self.dialect.quote_identifier(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quotes a table name, qualified with `schema` when present.
    #[must_use]
    pub fn wrap_table(&self, table: &str, schema: Option<&str>) -> String {
        match schema {
            Some(schema) => self.wrap(&format!("{schema}.{table}")),
            None => self.wrap(table),
        }
    }

    /// Quotes and comma-joins a column list.
    #[must_use]
    pub fn columnize(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.wrap(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Quotes one column, or a parenthesized column list.
    #[must_use]
    pub fn wrap_columns(&self, columns: &Columns) -> String {
        match columns {
            Columns::Single(column) => self.wrap(column),
            Columns::Multi(list) => format!("({})", self.columnize(list)),
        }
    }

    /// Records a binding and returns its placeholder.
    pub fn parameter(&mut self, value: &SqlValue) -> String {
        self.bindings.push(value.clone());
        String::from(self.dialect.parameter_placeholder())
    }

    /// Embeds a raw fragment and records its bindings.
    pub fn unwrap_raw(&mut self, raw: &Raw) -> String {
        self.bindings.extend(raw.bindings.iter().cloned());
        raw.sql.clone()
    }

    /// Renders the right-hand side of a comparison.
    pub fn operand(&mut self, operand: &Operand) -> String {
        match operand {
            Operand::Raw(raw) => self.unwrap_raw(raw),
            Operand::Column { column } => self.wrap(column),
            Operand::Value(value) => self.parameter(value),
        }
    }

    /// Renders a parenthesized placeholder group for an `in` list.
    pub fn values(&mut self, values: &InValues) -> String {
        match values {
            InValues::Raw(raw) => format!("({})", self.unwrap_raw(raw)),
            InValues::List(list) => format!("({})", self.parameterize(list)),
            InValues::Tuples(rows) => {
                let groups: Vec<String> = rows
                    .iter()
                    .map(|row| format!("({})", self.parameterize(row)))
                    .collect();
                format!("({})", groups.join(", "))
            }
        }
    }

    fn parameterize(&mut self, values: &[SqlValue]) -> String {
        values
            .iter()
            .map(|value| self.parameter(value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Checks a comparison operator against the dialect and normalizes it
    /// to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::OperatorNotPermitted`] for anything the
    /// dialect does not accept.
    pub fn operator(&self, operator: &str) -> Result<String> {
        let normalized = operator.trim().to_lowercase();
        if self.dialect.permits_operator(&normalized) {
            Ok(normalized)
        } else {
            Err(CompileError::OperatorNotPermitted(String::from(operator)))
        }
    }

    /// Consumes the formatter and returns the recorded bindings.
    #[must_use]
    pub fn into_bindings(self) -> Vec<SqlValue> {
        self.bindings
    }
}

/// Splits `name as alias`, matching ` as ` case-insensitively.
fn split_alias(identifier: &str) -> Option<(&str, &str)> {
    let lower = identifier.to_ascii_lowercase();
    let pos = lower.find(" as ")?;
    Some((identifier[..pos].trim(), identifier[pos + 4..].trim()))
}
