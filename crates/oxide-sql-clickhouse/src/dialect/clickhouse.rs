//! ClickHouse dialect implementation.

use super::{Dialect, DEFAULT_OPERATORS};

/// Operators ClickHouse adds on top of the common comparison set.
const CLICKHOUSE_OPERATORS: &[&str] = &["global in", "global not in"];

/// ClickHouse dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickHouseDialect;

impl ClickHouseDialect {
    /// Creates a new ClickHouse dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for ClickHouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn permits_operator(&self, operator: &str) -> bool {
        DEFAULT_OPERATORS.contains(&operator) || CLICKHOUSE_OPERATORS.contains(&operator)
    }
}
