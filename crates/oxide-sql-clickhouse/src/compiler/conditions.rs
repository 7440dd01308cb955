//! `where` / `prewhere` groups and the fragments they share with join
//! conditions.

use super::Session;
use crate::clause::{negate, Columns, InValues, Negatable, Raw, WhereClause, WhereClauseKind};
use crate::error::Result;
use crate::value::SqlValue;

impl Session<'_> {
    /// Compiles a clause group introduced by `keyword`.
    ///
    /// The keyword goes before the first contributing clause and each later
    /// clause is preceded by its own connector. A group where nothing
    /// contributes compiles to an empty string.
    pub(super) fn conditions(&mut self, keyword: &str, clauses: &[WhereClause]) -> Result<String> {
        let mut tokens: Vec<String> = Vec::with_capacity(clauses.len() * 2);
        for clause in clauses {
            if clause.contains_undefined() {
                self.undefined_in_where = true;
            }
            let Some(fragment) = self.where_fragment(clause)? else {
                continue;
            };
            if tokens.is_empty() {
                tokens.push(String::from(keyword));
            } else {
                tokens.push(String::from(clause.connector.as_str()));
            }
            tokens.push(fragment);
        }
        if tokens.len() > 1 {
            Ok(tokens.join(" "))
        } else {
            Ok(String::new())
        }
    }

    fn where_fragment(&mut self, clause: &WhereClause) -> Result<Option<String>> {
        let fragment = match &clause.kind {
            WhereClauseKind::Basic {
                column,
                operator,
                value,
            } => {
                let column = self.fmt.wrap(column);
                let operator = self.fmt.operator(operator)?;
                let value = self.fmt.operand(value);
                format!("{}{column} {operator} {value}", negate(clause, ""))
            }
            WhereClauseKind::Null { column } => self.null_fragment(clause, column),
            WhereClauseKind::In { column, value } => self.in_fragment(clause, column, value),
            WhereClauseKind::Between { column, value } => {
                self.between_fragment(clause, column, value)
            }
            WhereClauseKind::Exists { value } => self.exists_fragment(clause, value),
            WhereClauseKind::Wrapped { value } => {
                let nested = self.conditions("where", value)?;
                let Some(inner) = nested.strip_prefix("where ") else {
                    return Ok(None);
                };
                format!("{}({inner})", negate(clause, ""))
            }
            WhereClauseKind::Raw { value } => {
                format!("{}{}", negate(clause, ""), self.fmt.unwrap_raw(value))
            }
        };
        Ok(Some(fragment))
    }

    pub(super) fn null_fragment(&self, clause: &impl Negatable, column: &str) -> String {
        format!("{} is {}", self.fmt.wrap(column), negate(clause, "null"))
    }

    /// `column in (...)` or `(a, b) in (...)`.
    ///
    /// The left and right sides are rendered as given; pairing a column list
    /// with plain values or tuples of another width is left to the server.
    pub(super) fn in_fragment(
        &mut self,
        clause: &impl Negatable,
        column: &Columns,
        values: &InValues,
    ) -> String {
        if values.is_empty() {
            let always = if clause.is_negated() { "1 = 1" } else { "1 = 0" };
            return String::from(always);
        }
        let columns = self.fmt.wrap_columns(column);
        let values = self.fmt.values(values);
        format!("{columns} {}{values}", negate(clause, "in "))
    }

    pub(super) fn between_fragment(
        &mut self,
        clause: &impl Negatable,
        column: &str,
        bounds: &[SqlValue; 2],
    ) -> String {
        let column = self.fmt.wrap(column);
        let low = self.fmt.parameter(&bounds[0]);
        let high = self.fmt.parameter(&bounds[1]);
        format!("{column} {} {low} and {high}", negate(clause, "between"))
    }

    pub(super) fn exists_fragment(&mut self, clause: &impl Negatable, subquery: &Raw) -> String {
        format!(
            "{} ({})",
            negate(clause, "exists"),
            self.fmt.unwrap_raw(subquery)
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::clause::{BoolOp, Columns, InValues, Raw, WhereClause, WhereClauseKind};
    use crate::error::CompileError;
    use crate::value::SqlValue;
    use crate::QueryCompiler;

    fn prewhere(clauses: &[WhereClause]) -> (String, Vec<SqlValue>) {
        let compiled = QueryCompiler::new().compile_prewhere(clauses).unwrap();
        (compiled.sql, compiled.bindings)
    }

    #[test]
    fn test_single_basic() {
        let (sql, bindings) = prewhere(&[WhereClause::basic("x", "=", 1)]);
        assert_eq!(sql, "prewhere `x` = ?");
        assert_eq!(bindings, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_connectors() {
        let (sql, _) = prewhere(&[
            WhereClause::basic("x", "=", 1),
            WhereClause::null("y").or(),
            WhereClause::basic("z", ">", 2),
        ]);
        assert_eq!(sql, "prewhere `x` = ? or `y` is null and `z` > ?");
    }

    #[test]
    fn test_first_connector_ignored() {
        let (sql, _) = prewhere(&[WhereClause::null("x").or()]);
        assert_eq!(sql, "prewhere `x` is null");
    }

    #[test]
    fn test_empty_group() {
        let (sql, bindings) = prewhere(&[]);
        assert_eq!(sql, "");
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_negations() {
        let (sql, _) = prewhere(&[
            WhereClause::basic("a", "=", 1).not(),
            WhereClause::null("b").not(),
            WhereClause::in_list("c", vec![1, 2]).not(),
            WhereClause::between("d", 1, 5).not(),
            WhereClause::exists(Raw::new("select 1")).not(),
        ]);
        assert_eq!(
            sql,
            "prewhere not `a` = ? and `b` is not null and `c` not in (?, ?) \
             and `d` not between ? and ? and not exists (select 1)"
        );
    }

    #[test]
    fn test_between_order_of_bindings() {
        let (sql, bindings) = prewhere(&[WhereClause::between("d", 10, 20)]);
        assert_eq!(sql, "prewhere `d` between ? and ?");
        assert_eq!(bindings, vec![SqlValue::Int(10), SqlValue::Int(20)]);
    }

    #[test]
    fn test_wrapped_group() {
        let (sql, bindings) = prewhere(&[
            WhereClause::basic("a", "=", 1),
            WhereClause::wrapped(vec![
                WhereClause::basic("b", "=", 2),
                WhereClause::basic("c", "=", 3).or(),
            ])
            .not(),
        ]);
        assert_eq!(sql, "prewhere `a` = ? and not (`b` = ? or `c` = ?)");
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn test_empty_wrapped_group_contributes_nothing() {
        let (sql, _) = prewhere(&[WhereClause::wrapped(vec![]), WhereClause::null("x")]);
        assert_eq!(sql, "prewhere `x` is null");
    }

    #[test]
    fn test_tuple_in() {
        let (sql, bindings) = prewhere(&[WhereClause::in_tuples(
            &["a", "b"],
            vec![
                vec![SqlValue::Int(1), SqlValue::Int(2)],
                vec![SqlValue::Int(3), SqlValue::Int(4)],
            ],
        )]);
        assert_eq!(sql, "prewhere (`a`, `b`) in ((?, ?), (?, ?))");
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_empty_in_list() {
        let (sql, _) = prewhere(&[WhereClause::in_list::<i64>("a", vec![])]);
        assert_eq!(sql, "prewhere 1 = 0");
        let (sql, _) = prewhere(&[WhereClause::in_list::<i64>("a", vec![]).not()]);
        assert_eq!(sql, "prewhere 1 = 1");
    }

    #[test]
    fn test_column_list_with_plain_values() {
        let clause = WhereClause {
            kind: WhereClauseKind::In {
                column: Columns::Multi(vec![String::from("a")]),
                value: InValues::List(vec![SqlValue::Int(1), SqlValue::Int(2)]),
            },
            negated: false,
            connector: BoolOp::And,
        };
        let (sql, bindings) = prewhere(&[clause]);
        assert_eq!(sql, "prewhere (`a`) in (?, ?)");
        assert_eq!(bindings, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_tuple_width_not_checked() {
        let clause = WhereClause::in_tuples(&["a", "b"], vec![vec![SqlValue::Int(1)]]);
        let (sql, _) = prewhere(&[clause]);
        assert_eq!(sql, "prewhere (`a`, `b`) in ((?))");
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let err = QueryCompiler::new()
            .compile_prewhere(&[WhereClause::basic("a", "=; drop table t", 1)])
            .unwrap_err();
        assert!(matches!(err, CompileError::OperatorNotPermitted(_)));
    }

    #[test]
    fn test_raw_with_bindings() {
        let (sql, bindings) = prewhere(&[
            WhereClause::raw(Raw::new("hasAny(tags, [?])").bind("a")),
            WhereClause::columns("x", "<", "y"),
        ]);
        assert_eq!(sql, "prewhere hasAny(tags, [?]) and `x` < `y`");
        assert_eq!(bindings, vec![SqlValue::Text(String::from("a"))]);
    }

    #[test]
    fn test_undefined_flag_still_compiles() {
        let compiled = QueryCompiler::new()
            .compile_prewhere(&[WhereClause::basic("x", "=", SqlValue::Undefined)])
            .unwrap();
        assert_eq!(compiled.sql, "prewhere `x` = ?");
        assert!(compiled.undefined_in_where);
    }

    #[test]
    fn test_undefined_inside_wrapped_group() {
        let compiled = QueryCompiler::new()
            .compile_prewhere(&[WhereClause::wrapped(vec![WhereClause::basic(
                "x",
                "=",
                SqlValue::Undefined,
            )])])
            .unwrap();
        assert!(compiled.undefined_in_where);
    }

    #[test]
    fn test_idempotent() {
        let clauses = [
            WhereClause::basic("x", "=", 1),
            WhereClause::in_list("y", vec!["a", "b"]).or(),
        ];
        let compiler = QueryCompiler::new();
        let first = compiler.compile_prewhere(&clauses).unwrap();
        let second = compiler.compile_prewhere(&clauses).unwrap();
        assert_eq!(first, second);
    }
}
