//! Clause descriptors.
//!
//! These are the immutable inputs of the compiler. A query-building layer
//! creates them, groups them by category in [`GroupedClauses`], and hands the
//! whole tree to [`QueryCompiler`](crate::QueryCompiler).
//!
//! Every descriptor (de)serializes with camelCase field names and a `type`
//! tag, so a clause tree can also be read from JSON:
//!
//! ```rust
//! use oxide_sql_clickhouse::clause::WhereClause;
//!
//! let clause: WhereClause = serde_json::from_str(
//!     r#"{"type": "basic", "column": "x", "operator": "=", "value": 1, "bool": "or"}"#,
//! )
//! .unwrap();
//! assert_eq!(clause, WhereClause::basic("x", "=", 1).or());
//! ```

mod array_join;
mod grouped;
mod raw;
mod where_clause;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use array_join::{
    ArrayJoinClause, ArrayJoinType, ConditionIndex, JoinCondition, JoinConditionKind,
    JoinConditions, JoinTable,
};
pub use grouped::{Direction, GroupClause, GroupedClauses, OrderClause};
pub use raw::Raw;
pub use where_clause::{InValues, Operand, WhereClause, WhereClauseKind};

/// Boolean connector joining a clause to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    /// `and`
    #[default]
    And,
    /// `or`
    Or,
}

impl BoolOp {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column or a column tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Columns {
    /// A single column.
    Single(String),
    /// A list of columns, e.g. the left side of a tuple `in`.
    Multi(Vec<String>),
}

impl Columns {
    /// Returns the columns as a slice-like list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Single(column) => vec![column.clone()],
            Self::Multi(columns) => columns.clone(),
        }
    }
}

impl From<&str> for Columns {
    fn from(column: &str) -> Self {
        Self::Single(String::from(column))
    }
}

impl From<String> for Columns {
    fn from(column: String) -> Self {
        Self::Single(column)
    }
}

impl From<Vec<String>> for Columns {
    fn from(columns: Vec<String>) -> Self {
        Self::Multi(columns)
    }
}

impl From<&[&str]> for Columns {
    fn from(columns: &[&str]) -> Self {
        Self::Multi(columns.iter().map(|s| String::from(*s)).collect())
    }
}

/// A clause that can be negated with `not`.
pub trait Negatable {
    /// Returns `true` when the clause carries the `not` flag.
    fn is_negated(&self) -> bool;
}

/// Prefixes `token` with `not ` when the clause is negated.
///
/// Every sub-compiler spells negation through this function.
///
/// ```rust
/// use oxide_sql_clickhouse::clause::{negate, WhereClause};
///
/// assert_eq!(negate(&WhereClause::null("x"), "null"), "null");
/// assert_eq!(negate(&WhereClause::null("x").not(), "null"), "not null");
/// ```
pub fn negate(clause: &impl Negatable, token: &str) -> String {
    if clause.is_negated() {
        format!("not {token}")
    } else {
        String::from(token)
    }
}
