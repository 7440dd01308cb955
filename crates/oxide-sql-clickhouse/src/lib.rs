//! # oxide-sql-clickhouse
//!
//! ClickHouse SQL fragment compiler.
//!
//! A query-building layer collects clause descriptors (array joins, `prewhere`
//! and `where` conditions, ordering, limits, update assignments) into a
//! [`Query`]. [`QueryCompiler`] turns that tree into SQL text with `?`
//! placeholders and an ordered binding list:
//!
//! - `ARRAY JOIN` with `inner`, `left` or raw forms, with `on` / `using`
//!   sub-clauses
//! - the ClickHouse-only `PREWHERE` filter
//! - `LIMIT` that survives an offset without a limit
//! - `UPDATE` assembled in ClickHouse order (join, set, where, order, limit)
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_clickhouse::clause::{ArrayJoinClause, ArrayJoinType, WhereClause};
//! use oxide_sql_clickhouse::{Query, QueryCompiler};
//!
//! let query = Query::table("events")
//!     .array_join(
//!         ArrayJoinClause::new("tags", ArrayJoinType::Left, None).with_conditions(|on| {
//!             on.using(&["id"]);
//!         }),
//!     )
//!     .prewhere(WhereClause::basic("date", "=", "2024-01-01"))
//!     .limit(5);
//!
//! let compiled = QueryCompiler::new().compile_select(&query).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     "select * from `events` left join `tags` using `id` prewhere `date` = ? limit 5"
//! );
//! ```
//!
//! ## Undefined values
//!
//! A comparison built with [`SqlValue::Undefined`] still compiles, but the
//! result carries `undefined_in_where = true`. Call
//! [`CompiledQuery::ensure_defined`] before running the statement.

pub mod clause;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod formatter;
pub mod query;
pub mod value;

pub use clause::negate;
pub use compiler::{assemble_update, Advisory, CompiledQuery, QueryCompiler};
pub use dialect::{ClickHouseDialect, Dialect};
pub use error::{CompileError, Result};
pub use formatter::Formatter;
pub use query::{Assignment, Limit, LockMode, Query};
pub use value::{SqlValue, ToSqlValue};
