//! SQL Dialect support.
//!
//! The compiler asks its dialect how identifiers are quoted, which comparison
//! operators are permitted, and what the largest representable `LIMIT` is.

mod clickhouse;

pub use clickhouse::ClickHouseDialect;

/// Operators accepted in comparison clauses unless a dialect narrows the set.
///
/// Only plain ClickHouse comparison syntax. Ranges go through `between`
/// clauses and pattern checks through `match()` in a raw fragment, so
/// `between`, `not between` and the `regexp` family are not basic operators.
const DEFAULT_OPERATORS: &[&str] = &[
    "=", "==", "<", ">", "<=", ">=", "<>", "!=", "like", "not like", "ilike", "not ilike", "in",
    "not in",
];

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns whether the dialect supports RETURNING clause.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Largest row count accepted by `LIMIT`.
    fn max_limit(&self) -> u64 {
        u64::MAX
    }

    /// Returns whether `operator` (already lowercased) may appear in a
    /// comparison clause.
    fn permits_operator(&self, operator: &str) -> bool {
        DEFAULT_OPERATORS.contains(&operator)
    }

    /// Quotes a single identifier segment, doubling embedded quote chars.
    ///
    /// `*` is passed through untouched.
    fn quote_identifier(&self, name: &str) -> String {
        if name == "*" {
            return String::from("*");
        }
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainDialect;

    impl Dialect for PlainDialect {
        fn name(&self) -> &'static str {
            "plain"
        }
    }

    #[test]
    fn test_default_dialect_behavior() {
        let dialect = PlainDialect;
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.parameter_placeholder(), "?");
        assert_eq!(dialect.quote_identifier("users"), "\"users\"");
        assert_eq!(dialect.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(dialect.quote_identifier("*"), "*");
        assert!(dialect.permits_operator("not like"));
        assert!(!dialect.permits_operator("; drop"));
    }

    #[test]
    fn test_range_and_regexp_operators_refused() {
        let dialect = PlainDialect;
        for operator in ["between", "not between", "regexp", "not regexp", "rlike"] {
            assert!(!dialect.permits_operator(operator), "{operator}");
        }
    }
}
