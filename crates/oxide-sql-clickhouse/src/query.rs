//! The full clause tree of one statement.

use serde::{Deserialize, Serialize};

use crate::clause::{
    ArrayJoinClause, GroupClause, GroupedClauses, Operand, OrderClause, Raw, WhereClause,
};
use crate::error::Result;
use crate::value::{SqlValue, ToSqlValue};

/// Requested `LIMIT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    /// A plain number, inlined as a literal.
    Literal(u64),
    /// A raw fragment.
    Raw(Raw),
    /// A value sent as a binding.
    Bind {
        /// The bound value.
        bind: SqlValue,
    },
}

/// Row locking mode appended to a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockMode {
    /// `for update`
    ForUpdate,
    /// `lock in share mode`
    ForShare,
}

impl LockMode {
    /// Returns the SQL text of the lock clause.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::ForUpdate => "for update",
            Self::ForShare => "lock in share mode",
        }
    }
}

/// One `set` assignment of an UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Target column.
    pub column: String,
    /// New value; missing means undefined.
    #[serde(default)]
    pub value: Operand,
}

/// Everything the compiler needs to render one statement.
///
/// # Example
///
/// ```rust
/// use oxide_sql_clickhouse::clause::WhereClause;
/// use oxide_sql_clickhouse::{QueryCompiler, Query};
///
/// let query = Query::table("events")
///     .prewhere(WhereClause::basic("date", ">=", "2024-01-01"))
///     .where_clause(WhereClause::basic("kind", "=", "click"))
///     .limit(10);
///
/// let compiled = QueryCompiler::new().compile_select(&query).unwrap();
/// assert_eq!(
///     compiled.sql,
///     "select * from `events` prewhere `date` >= ? where `kind` = ? limit 10"
/// );
/// assert_eq!(compiled.bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    /// Target table.
    pub table: Option<String>,
    /// Schema qualifier of the target table.
    pub schema: Option<String>,
    /// Selected columns; empty means `*`.
    pub columns: Vec<String>,
    /// Clause lists by category.
    #[serde(flatten)]
    pub grouped: GroupedClauses,
    /// UPDATE assignments, in order.
    pub update: Vec<Assignment>,
    /// Requested limit.
    pub limit: Option<Limit>,
    /// Requested offset.
    pub offset: Option<u64>,
    /// Lock clause for SELECT.
    pub lock: Option<LockMode>,
    /// Requested RETURNING columns; ClickHouse ignores them.
    pub returning: Vec<String>,
}

impl Query {
    /// Starts a query on `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Decodes a clause tree from JSON.
    ///
    /// An unknown clause `type` tag is rejected here, before anything is
    /// compiled.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Malformed`](crate::CompileError::Malformed) when
    /// the document does not describe a valid clause tree.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the schema qualifier.
    #[must_use]
    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = Some(String::from(schema));
        self
    }

    /// Sets the selected columns.
    #[must_use]
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Adds an array join.
    #[must_use]
    pub fn array_join(mut self, join: ArrayJoinClause) -> Self {
        self.grouped.array_join.push(join);
        self
    }

    /// Adds a prewhere clause.
    #[must_use]
    pub fn prewhere(mut self, clause: WhereClause) -> Self {
        self.grouped.prewhere.push(clause);
        self
    }

    /// Adds a where clause.
    #[must_use]
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.grouped.wheres.push(clause);
        self
    }

    /// Adds a `group by` column.
    #[must_use]
    pub fn group_by(mut self, column: &str) -> Self {
        self.grouped.group.push(GroupClause::Basic {
            column: String::from(column),
        });
        self
    }

    /// Adds an `order by` entry.
    #[must_use]
    pub fn order_by(mut self, order: OrderClause) -> Self {
        self.grouped.order.push(order);
        self
    }

    /// Adds an UPDATE assignment.
    #[must_use]
    pub fn set(mut self, column: &str, value: impl Into<Operand>) -> Self {
        self.update.push(Assignment {
            column: String::from(column),
            value: value.into(),
        });
        self
    }

    /// Sets an inlined limit.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(Limit::Literal(limit));
        self
    }

    /// Sets a limit sent as a binding.
    #[must_use]
    pub fn limit_bound<T: ToSqlValue>(mut self, limit: T) -> Self {
        self.limit = Some(Limit::Bind {
            bind: limit.to_sql_value(),
        });
        self
    }

    /// Sets the offset.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the lock mode.
    #[must_use]
    pub fn lock(mut self, lock: LockMode) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Requests RETURNING columns.
    #[must_use]
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|s| String::from(*s)).collect();
        self
    }
}
