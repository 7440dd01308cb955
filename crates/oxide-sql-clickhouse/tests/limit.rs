//! Tests for limit and offset compilation.

mod common;
use common::*;

use oxide_sql_clickhouse::{Limit, Query, SqlValue};

#[test]
fn offset_without_limit() {
    let compiled = compiler().compile_limit(None, Some(10));
    assert_eq!(compiled.sql, "limit 18446744073709551615");
}

#[test]
fn limit_with_zero_offset() {
    let compiled = compiler().compile_limit(Some(&Limit::Literal(5)), Some(0));
    assert_eq!(compiled.sql, "limit 5");
}

#[test]
fn neither_limit_nor_offset() {
    let compiled = compiler().compile_limit(None, None);
    assert_eq!(compiled.sql, "");
    assert!(compiled.bindings.is_empty());
}

#[test]
fn select_with_offset_only() {
    let compiled = select(&Query::table("t").offset(5));
    assert_eq!(
        compiled.sql,
        "select * from `t` limit 18446744073709551615 offset 5"
    );
}

#[test]
fn bound_limit_from_json() {
    let query = from_json(r#"{"table": "t", "limit": {"bind": 20}, "offset": 40}"#);
    let compiled = select(&query);
    assert_eq!(compiled.sql, "select * from `t` limit ? offset 40");
    assert_eq!(compiled.bindings, vec![SqlValue::Int(20)]);
}

#[test]
fn limit_binding_follows_where_bindings() {
    let query = Query::table("t")
        .where_clause(oxide_sql_clickhouse::clause::WhereClause::basic("a", "=", 1))
        .limit_bound(9);
    let compiled = select(&query);
    assert_eq!(compiled.sql, "select * from `t` where `a` = ? limit ?");
    assert_eq!(compiled.bindings, vec![SqlValue::Int(1), SqlValue::Int(9)]);
}
