//! Clause compiler.
//!
//! [`QueryCompiler`] turns grouped clause descriptors into SQL text and an
//! ordered binding list. It keeps no state between calls: every call opens a
//! fresh compilation that owns its own binding accumulator and undefined-value
//! flag, and hands both back inside the [`CompiledQuery`].

mod array_join;
mod conditions;
mod limit;
mod statement;

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

pub use statement::assemble_update;

use crate::clause::{ArrayJoinClause, WhereClause};
use crate::dialect::{ClickHouseDialect, Dialect};
use crate::error::{CompileError, Result};
use crate::formatter::Formatter;
use crate::query::{Limit, Query};
use crate::value::SqlValue;

/// A non-fatal note about the compiled statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    /// RETURNING columns were requested but the dialect ignores them.
    ReturningUnsupported {
        /// Dialect name.
        dialect: &'static str,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturningUnsupported { dialect } => write!(
                f,
                "returning is not supported by {dialect} and will not have any effect"
            ),
        }
    }
}

/// SQL text plus its bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub bindings: Vec<SqlValue>,
    /// Set when a where/prewhere comparison was built with an undefined value.
    pub undefined_in_where: bool,
    /// Non-fatal notes collected while compiling.
    pub advisories: Vec<Advisory>,
}

impl CompiledQuery {
    /// Returns `true` when nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Rejects the statement if any undefined value made it in.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UndefinedBinding`] when the undefined-value
    /// flag is set or a binding is the undefined sentinel.
    pub fn ensure_defined(self) -> Result<Self> {
        if self.undefined_in_where || self.bindings.iter().any(SqlValue::is_undefined) {
            return Err(CompileError::UndefinedBinding { sql: self.sql });
        }
        Ok(self)
    }

    /// Renders the SQL with bindings inlined, for logs and debugging only.
    ///
    /// `?` inside quoted literals and identifiers is left alone. Returns
    /// `None` when the remaining `?` count differs from the binding count,
    /// e.g. a raw fragment using the `cond ? a : b` ternary, since the
    /// placeholders cannot then be told apart.
    #[must_use]
    pub fn to_sql_inline(&self) -> Option<String> {
        let positions = placeholder_positions(&self.sql);
        if positions.len() != self.bindings.len() {
            return None;
        }
        let mut out = String::with_capacity(self.sql.len());
        let mut last = 0;
        for (pos, value) in positions.into_iter().zip(&self.bindings) {
            out.push_str(&self.sql[last..pos]);
            out.push_str(&value.to_sql_inline());
            last = pos + 1;
        }
        out.push_str(&self.sql[last..]);
        Some(out)
    }
}

/// Byte offsets of `?` outside `'...'`, `"..."` and `` `...` `` spans.
fn placeholder_positions(sql: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (pos, ch) in sql.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if ch == '\\' => escaped = true,
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '?' => positions.push(pos),
                _ => {}
            },
        }
    }
    positions
}

/// Per-call compilation state.
struct Session<'a> {
    fmt: Formatter<'a>,
    undefined_in_where: bool,
    advisories: Vec<Advisory>,
}

impl<'a> Session<'a> {
    const fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            fmt: Formatter::new(dialect),
            undefined_in_where: false,
            advisories: Vec::new(),
        }
    }

    fn check_returning(&mut self, query: &Query) {
        let dialect = self.fmt.dialect();
        if !query.returning.is_empty() && !dialect.supports_returning() {
            let advisory = Advisory::ReturningUnsupported {
                dialect: dialect.name(),
            };
            warn!("{advisory}");
            self.advisories.push(advisory);
        }
    }

    fn finish(self, sql: String) -> CompiledQuery {
        if self.undefined_in_where {
            warn!(sql = %sql, "Undefined value in where clause");
        }
        CompiledQuery {
            sql,
            bindings: self.fmt.into_bindings(),
            undefined_in_where: self.undefined_in_where,
            advisories: self.advisories,
        }
    }
}

/// Compiles clause trees for one dialect.
///
/// # Example
///
/// ```rust
/// use oxide_sql_clickhouse::clause::{ArrayJoinClause, ArrayJoinType};
/// use oxide_sql_clickhouse::QueryCompiler;
///
/// let join = ArrayJoinClause::new("arr", ArrayJoinType::Left, None)
///     .with_conditions(|on| {
///         on.using(&["id"]);
///     });
///
/// let compiled = QueryCompiler::new().compile_array_join(&[join]).unwrap();
/// assert_eq!(compiled.sql, "left join `arr` using `id`");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryCompiler<D: Dialect = ClickHouseDialect> {
    dialect: D,
}

impl QueryCompiler<ClickHouseDialect> {
    /// Creates a ClickHouse compiler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dialect: ClickHouseDialect::new(),
        }
    }
}

impl<D: Dialect> QueryCompiler<D> {
    /// Creates a compiler for another dialect.
    pub const fn with_dialect(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    fn session(&self) -> Session<'_> {
        Session::new(&self.dialect)
    }

    /// Compiles the `arrayJoin` category.
    ///
    /// # Errors
    ///
    /// Returns a construction error for malformed join descriptors.
    pub fn compile_array_join(&self, joins: &[ArrayJoinClause]) -> Result<CompiledQuery> {
        let mut session = self.session();
        let sql = session.array_join(joins)?;
        Ok(session.finish(sql))
    }

    /// Compiles the `prewhere` category.
    ///
    /// # Errors
    ///
    /// Returns a construction error for malformed clauses.
    pub fn compile_prewhere(&self, clauses: &[WhereClause]) -> Result<CompiledQuery> {
        let mut session = self.session();
        let sql = session.conditions("prewhere", clauses)?;
        Ok(session.finish(sql))
    }

    /// Compiles the `where` category.
    ///
    /// # Errors
    ///
    /// Returns a construction error for malformed clauses.
    pub fn compile_where(&self, clauses: &[WhereClause]) -> Result<CompiledQuery> {
        let mut session = self.session();
        let sql = session.conditions("where", clauses)?;
        Ok(session.finish(sql))
    }

    /// Compiles the limit, including the offset-without-limit workaround.
    pub fn compile_limit(&self, limit: Option<&Limit>, offset: Option<u64>) -> CompiledQuery {
        let mut session = self.session();
        let sql = session.limit(limit, offset);
        session.finish(sql)
    }

    /// Compiles an UPDATE: join, set list, where, order and limit.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MissingTable`] or [`CompileError::EmptyUpdate`]
    /// for incomplete statements, or a construction error for malformed
    /// clauses.
    pub fn compile_update(&self, query: &Query) -> Result<CompiledQuery> {
        let table = query.table.as_deref().ok_or(CompileError::MissingTable)?;
        if query.update.is_empty() {
            return Err(CompileError::EmptyUpdate);
        }

        let mut session = self.session();
        session.check_returning(query);
        let table = session.fmt.wrap_table(table, query.schema.as_deref());
        let join = session.array_join(&query.grouped.array_join)?;
        let updates = session.assignments(&query.update);
        let where_sql = session.conditions("where", &query.grouped.wheres)?;
        let order = session.order(&query.grouped.order);
        let limit = session.limit(query.limit.as_ref(), query.offset);

        let sql = assemble_update(&table, &join, &updates, &where_sql, &order, &limit);
        debug!(sql = %sql, "Compiled update");
        Ok(session.finish(sql))
    }

    /// Compiles a SELECT with array join, prewhere, where, group, order,
    /// limit, offset and lock clauses.
    ///
    /// # Errors
    ///
    /// Returns a construction error for malformed clauses.
    pub fn compile_select(&self, query: &Query) -> Result<CompiledQuery> {
        let mut session = self.session();
        session.check_returning(query);

        let columns = if query.columns.is_empty() {
            String::from("*")
        } else {
            session.fmt.columnize(&query.columns)
        };
        let mut parts = vec![format!("select {columns}")];
        if let Some(table) = &query.table {
            parts.push(format!(
                "from {}",
                session.fmt.wrap_table(table, query.schema.as_deref())
            ));
        }

        let fragments = [
            session.array_join(&query.grouped.array_join)?,
            session.conditions("prewhere", &query.grouped.prewhere)?,
            session.conditions("where", &query.grouped.wheres)?,
            session.group(&query.grouped.group),
            session.order(&query.grouped.order),
            session.limit(query.limit.as_ref(), query.offset),
            limit::offset(query.offset),
            query.lock.map(|lock| String::from(lock.as_sql())).unwrap_or_default(),
        ];
        parts.extend(fragments.into_iter().filter(|fragment| !fragment.is_empty()));

        let sql = parts.join(" ");
        debug!(sql = %sql, "Compiled select");
        Ok(session.finish(sql))
    }
}
