#![allow(dead_code)]

use oxide_sql_clickhouse::clause::{ArrayJoinClause, WhereClause};
use oxide_sql_clickhouse::{CompileError, CompiledQuery, Query, QueryCompiler};

pub fn compiler() -> QueryCompiler {
    QueryCompiler::new()
}

pub fn select(query: &Query) -> CompiledQuery {
    compiler()
        .compile_select(query)
        .unwrap_or_else(|e| panic!("Failed to compile select: {query:?}\nError: {e:?}"))
}

pub fn update(query: &Query) -> CompiledQuery {
    compiler()
        .compile_update(query)
        .unwrap_or_else(|e| panic!("Failed to compile update: {query:?}\nError: {e:?}"))
}

pub fn prewhere(clauses: &[WhereClause]) -> CompiledQuery {
    compiler()
        .compile_prewhere(clauses)
        .unwrap_or_else(|e| panic!("Failed to compile prewhere: {clauses:?}\nError: {e:?}"))
}

pub fn array_join(joins: &[ArrayJoinClause]) -> CompiledQuery {
    compiler()
        .compile_array_join(joins)
        .unwrap_or_else(|e| panic!("Failed to compile array join: {joins:?}\nError: {e:?}"))
}

pub fn from_json(json: &str) -> Query {
    Query::from_json(json).unwrap_or_else(|e| panic!("Failed to decode: {json}\nError: {e:?}"))
}

pub fn select_err(query: &Query) -> CompileError {
    compiler()
        .compile_select(query)
        .expect_err(&format!("Expected compile error for: {query:?}"))
}

/// Compiles `query` twice and checks both results are byte-identical.
pub fn assert_idempotent(query: &Query) -> CompiledQuery {
    let first = select(query);
    let second = select(query);
    assert_eq!(first.sql, second.sql, "SQL changed between compilations");
    assert_eq!(
        first.bindings, second.bindings,
        "Bindings changed between compilations"
    );
    first
}
