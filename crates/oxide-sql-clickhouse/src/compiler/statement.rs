//! Statement assembly: UPDATE fragments, `order by` and `group by`.

use super::Session;
use crate::clause::{GroupClause, OrderClause};
use crate::query::Assignment;

/// Joins UPDATE fragments in their fixed order.
///
/// `join`, `where_clause`, `order` and `limit` are appended only when
/// non-empty; `updates` are comma-joined after `set`.
///
/// ```rust
/// use oxide_sql_clickhouse::assemble_update;
///
/// let sql = assemble_update("`t`", "", &[String::from("`x` = ?")], "where `id` = ?", "", "");
/// assert_eq!(sql, "update `t` set `x` = ? where `id` = ?");
/// ```
pub fn assemble_update(
    table: &str,
    join: &str,
    updates: &[String],
    where_clause: &str,
    order: &str,
    limit: &str,
) -> String {
    let mut sql = format!("update {table}");
    if !join.is_empty() {
        sql.push(' ');
        sql.push_str(join);
    }
    sql.push_str(" set ");
    sql.push_str(&updates.join(", "));
    for fragment in [where_clause, order, limit] {
        if !fragment.is_empty() {
            sql.push(' ');
            sql.push_str(fragment);
        }
    }
    sql
}

impl Session<'_> {
    pub(super) fn assignments(&mut self, assignments: &[Assignment]) -> Vec<String> {
        assignments
            .iter()
            .map(|assignment| {
                let column = self.fmt.wrap(&assignment.column);
                let value = self.fmt.operand(&assignment.value);
                format!("{column} = {value}")
            })
            .collect()
    }

    pub(super) fn order(&mut self, order: &[OrderClause]) -> String {
        if order.is_empty() {
            return String::new();
        }
        let items: Vec<String> = order
            .iter()
            .map(|item| match item {
                OrderClause::Basic { column, direction } => {
                    format!("{} {}", self.fmt.wrap(column), direction.as_str())
                }
                OrderClause::Raw { value } => self.fmt.unwrap_raw(value),
            })
            .collect();
        format!("order by {}", items.join(", "))
    }

    pub(super) fn group(&mut self, group: &[GroupClause]) -> String {
        if group.is_empty() {
            return String::new();
        }
        let items: Vec<String> = group
            .iter()
            .map(|item| match item {
                GroupClause::Basic { column } => self.fmt.wrap(column),
                GroupClause::Raw { value } => self.fmt.unwrap_raw(value),
            })
            .collect();
        format!("group by {}", items.join(", "))
    }
}
