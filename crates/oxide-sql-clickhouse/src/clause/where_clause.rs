//! `where` / `prewhere` clause descriptors.

use serde::{Deserialize, Serialize};

use super::{BoolOp, Columns, Negatable, Raw};
use crate::value::{SqlValue, ToSqlValue};

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// A raw fragment, inlined with its bindings.
    Raw(Raw),
    /// Another column, quoted as an identifier.
    Column {
        /// Column name.
        column: String,
    },
    /// A bound value.
    Value(SqlValue),
}

impl Operand {
    /// Returns `true` when the operand carries the undefined sentinel.
    #[must_use]
    pub fn contains_undefined(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.contains_undefined(),
            Self::Column { .. } => false,
            Self::Value(value) => value.is_undefined(),
        }
    }
}

impl Default for Operand {
    /// A missing operand is the undefined sentinel.
    fn default() -> Self {
        Self::Value(SqlValue::Undefined)
    }
}

impl<T: ToSqlValue> From<T> for Operand {
    fn from(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<Raw> for Operand {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

/// Right-hand side of an `in` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InValues {
    /// A subquery or raw list.
    Raw(Raw),
    /// Value tuples, paired with a multi-column left side.
    Tuples(Vec<Vec<SqlValue>>),
    /// Plain values, paired with a single column.
    List(Vec<SqlValue>),
}

impl InValues {
    /// Returns `true` for an empty value or tuple list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(_) => false,
            Self::Tuples(rows) => rows.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }

    /// Returns `true` when any value is the undefined sentinel.
    #[must_use]
    pub fn contains_undefined(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.contains_undefined(),
            Self::Tuples(rows) => rows.iter().flatten().any(SqlValue::is_undefined),
            Self::List(values) => values.iter().any(SqlValue::is_undefined),
        }
    }
}

/// The kind-specific part of a [`WhereClause`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WhereClauseKind {
    /// `column operator value`
    Basic {
        /// Column name.
        column: String,
        /// Comparison operator.
        operator: String,
        /// Compared value; missing means undefined.
        #[serde(default)]
        value: Operand,
    },
    /// `column is null`
    Null {
        /// Column name.
        column: String,
    },
    /// `column in (...)` or `(a, b) in ((...), (...))`
    In {
        /// Left side.
        column: Columns,
        /// Right side.
        value: InValues,
    },
    /// `column between low and high`
    Between {
        /// Column name.
        column: String,
        /// Lower and upper bound.
        value: [SqlValue; 2],
    },
    /// `exists (subquery)`
    Exists {
        /// The subquery.
        value: Raw,
    },
    /// A parenthesized nested group.
    Wrapped {
        /// Nested clauses, compiled like a `where` group.
        value: Vec<WhereClause>,
    },
    /// A raw fragment.
    Raw {
        /// The fragment.
        value: Raw,
    },
}

impl WhereClauseKind {
    /// Returns the `type` tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Null { .. } => "null",
            Self::In { .. } => "in",
            Self::Between { .. } => "between",
            Self::Exists { .. } => "exists",
            Self::Wrapped { .. } => "wrapped",
            Self::Raw { .. } => "raw",
        }
    }
}

/// One clause of a `where` or `prewhere` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    /// What the clause compares.
    #[serde(flatten)]
    pub kind: WhereClauseKind,
    /// Negation flag.
    #[serde(rename = "not", default)]
    pub negated: bool,
    /// Connector to the previous clause; ignored for the first one.
    #[serde(rename = "bool", default)]
    pub connector: BoolOp,
}

impl WhereClause {
    fn from_kind(kind: WhereClauseKind) -> Self {
        Self {
            kind,
            negated: false,
            connector: BoolOp::And,
        }
    }

    /// `column operator ?`
    pub fn basic(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> Self {
        Self::from_kind(WhereClauseKind::Basic {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        })
    }

    /// `column operator other_column`
    pub fn columns(
        column: impl Into<String>,
        operator: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        Self::from_kind(WhereClauseKind::Basic {
            column: column.into(),
            operator: operator.into(),
            value: Operand::Column {
                column: other.into(),
            },
        })
    }

    /// `column is null`
    pub fn null(column: impl Into<String>) -> Self {
        Self::from_kind(WhereClauseKind::Null {
            column: column.into(),
        })
    }

    /// `column in (?, ?, ...)`
    pub fn in_list<T: ToSqlValue>(column: impl Into<String>, values: Vec<T>) -> Self {
        Self::from_kind(WhereClauseKind::In {
            column: Columns::Single(column.into()),
            value: InValues::List(values.into_iter().map(ToSqlValue::to_sql_value).collect()),
        })
    }

    /// `(a, b) in ((?, ?), ...)`
    pub fn in_tuples(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> Self {
        Self::from_kind(WhereClauseKind::In {
            column: Columns::from(columns),
            value: InValues::Tuples(rows),
        })
    }

    /// `column in (subquery)`
    pub fn in_subquery(column: impl Into<String>, subquery: Raw) -> Self {
        Self::from_kind(WhereClauseKind::In {
            column: Columns::Single(column.into()),
            value: InValues::Raw(subquery),
        })
    }

    /// `column between ? and ?`
    pub fn between<L: ToSqlValue, H: ToSqlValue>(
        column: impl Into<String>,
        low: L,
        high: H,
    ) -> Self {
        Self::from_kind(WhereClauseKind::Between {
            column: column.into(),
            value: [low.to_sql_value(), high.to_sql_value()],
        })
    }

    /// `exists (subquery)`
    pub fn exists(subquery: Raw) -> Self {
        Self::from_kind(WhereClauseKind::Exists { value: subquery })
    }

    /// `(nested group)`
    pub fn wrapped(clauses: Vec<Self>) -> Self {
        Self::from_kind(WhereClauseKind::Wrapped { value: clauses })
    }

    /// A raw fragment.
    pub fn raw(raw: Raw) -> Self {
        Self::from_kind(WhereClauseKind::Raw { value: raw })
    }

    /// Negates the clause.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Joins the clause to the previous one with `or`.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.connector = BoolOp::Or;
        self
    }

    /// Returns `true` when the compared value is, or contains, the undefined
    /// sentinel. Nested groups are checked when they are compiled.
    #[must_use]
    pub fn contains_undefined(&self) -> bool {
        match &self.kind {
            WhereClauseKind::Basic { value, .. } => value.contains_undefined(),
            WhereClauseKind::In { value, .. } => value.contains_undefined(),
            WhereClauseKind::Between { value, .. } => value.iter().any(SqlValue::is_undefined),
            WhereClauseKind::Exists { value } | WhereClauseKind::Raw { value } => {
                value.contains_undefined()
            }
            WhereClauseKind::Null { .. } | WhereClauseKind::Wrapped { .. } => false,
        }
    }
}

impl Negatable for WhereClause {
    fn is_negated(&self) -> bool {
        self.negated
    }
}
