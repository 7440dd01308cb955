//! Library side of the `oxide-sql-compile` command.
//!
//! Reads a JSON clause tree, compiles it with the ClickHouse compiler and
//! renders the result for the terminal.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use oxide_sql_clickhouse::{CompiledQuery, Query, QueryCompiler};

/// Statement kind to compile the clause tree as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `select ...`
    Select,
    /// `update ...`
    Update,
}

/// Reads the clause tree from `path`, or from stdin when no path is given.
///
/// # Errors
///
/// Fails when the file or stdin cannot be read as UTF-8.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading clause tree");
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            debug!("Reading clause tree from stdin");
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Decodes and compiles one clause tree.
///
/// # Errors
///
/// Fails on a malformed clause tree, on a compile error, and with `strict`
/// on a statement carrying an undefined value.
pub fn compile(json: &str, kind: StatementKind, strict: bool) -> Result<CompiledQuery> {
    let query = Query::from_json(json).context("Invalid clause tree")?;
    let compiler = QueryCompiler::new();
    let compiled = match kind {
        StatementKind::Select => compiler.compile_select(&query)?,
        StatementKind::Update => compiler.compile_update(&query)?,
    };
    if strict {
        return Ok(compiled.ensure_defined()?);
    }
    Ok(compiled)
}

/// Renders a compiled statement: pretty JSON, or SQL with inlined values.
///
/// # Errors
///
/// Fails if the result cannot be serialized, or with `inline` when the
/// `?` placeholders cannot be matched to the bindings.
pub fn render(compiled: &CompiledQuery, inline: bool) -> Result<String> {
    if inline {
        return compiled
            .to_sql_inline()
            .context("Cannot inline: placeholders do not match bindings, use the JSON output");
    }
    Ok(serde_json::to_string_pretty(compiled)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_sql_clickhouse::{CompileError, SqlValue};

    const UNDEFINED: &str =
        r#"{"table": "t", "where": [{"type": "basic", "column": "x", "operator": "="}]}"#;

    #[test]
    fn test_compile_select() {
        let compiled = compile(
            r#"{"table": "t", "prewhere": [{"type": "basic", "column": "x", "operator": "=", "value": 1}]}"#,
            StatementKind::Select,
            false,
        )
        .unwrap();
        assert_eq!(compiled.sql, "select * from `t` prewhere `x` = ?");
        assert_eq!(compiled.bindings, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_compile_update() {
        let compiled = compile(
            r#"{"table": "t", "update": [{"column": "a", "value": 2}]}"#,
            StatementKind::Update,
            false,
        )
        .unwrap();
        assert_eq!(compiled.sql, "update `t` set `a` = ?");
    }

    #[test]
    fn test_strict_rejects_undefined() {
        let lenient = compile(UNDEFINED, StatementKind::Select, false).unwrap();
        assert!(lenient.undefined_in_where);

        let err = compile(UNDEFINED, StatementKind::Select, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompileError>(),
            Some(CompileError::UndefinedBinding { .. })
        ));
    }

    #[test]
    fn test_malformed_input() {
        let err = compile("{\"table\": 3}", StatementKind::Select, false).unwrap_err();
        assert!(err.to_string().contains("Invalid clause tree"));
    }

    #[test]
    fn test_render() {
        let compiled = compile(
            r#"{"table": "t", "where": [{"type": "basic", "column": "x", "operator": "=", "value": "a'b"}]}"#,
            StatementKind::Select,
            false,
        )
        .unwrap();
        assert_eq!(
            render(&compiled, true).unwrap(),
            "select * from `t` where `x` = 'a\\'b'"
        );

        let json: serde_json::Value = serde_json::from_str(&render(&compiled, false).unwrap()).unwrap();
        assert_eq!(json["sql"], "select * from `t` where `x` = ?");
        assert_eq!(json["bindings"][0], "a'b");
    }

    #[test]
    fn test_render_inline_refuses_ternary() {
        let compiled = compile(
            r#"{"table": "t", "where": [{"type": "raw", "value": {"sql": "(x > 1 ? 1 : 0) = ?", "bindings": [5]}}]}"#,
            StatementKind::Select,
            false,
        )
        .unwrap();
        let err = render(&compiled, true).unwrap_err();
        assert!(err.to_string().contains("Cannot inline"));

        let json: serde_json::Value = serde_json::from_str(&render(&compiled, false).unwrap()).unwrap();
        assert_eq!(json["sql"], "select * from `t` where (x > 1 ? 1 : 0) = ?");
        assert_eq!(json["bindings"][0], 5);
    }

    #[test]
    fn test_advisory_kept_in_result() {
        let compiled = compile(
            r#"{"table": "t", "update": [{"column": "a", "value": 2}], "returning": ["id"]}"#,
            StatementKind::Update,
            false,
        )
        .unwrap();
        assert_eq!(compiled.advisories.len(), 1);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.json");
        fs::write(&path, r#"{"table": "t"}"#).unwrap();
        assert_eq!(read_input(Some(path.as_path())).unwrap(), r#"{"table": "t"}"#);
        assert!(read_input(Some(dir.path().join("missing.json").as_path())).is_err());
    }
}
