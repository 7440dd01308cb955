use super::Session;
use crate::clause::{
    negate, ArrayJoinClause, ArrayJoinType, JoinCondition, JoinConditionKind, JoinConditions,
    JoinTable,
};
use crate::error::{CompileError, Result};

impl Session<'_> {
    /// Compiles every array join, separated by single spaces.
    pub(super) fn array_join(&mut self, joins: &[ArrayJoinClause]) -> Result<String> {
        let mut fragments = Vec::with_capacity(joins.len());
        for join in joins {
            let fragment = self.array_join_clause(join)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
        Ok(fragments.join(" "))
    }

    fn array_join_clause(&mut self, join: &ArrayJoinClause) -> Result<String> {
        if join.join_type == ArrayJoinType::Raw {
            return match &join.table {
                JoinTable::Raw(raw) => Ok(self.fmt.unwrap_raw(raw)),
                JoinTable::Name(_) => Err(CompileError::invalid(
                    "arrayJoin",
                    "a raw array join needs a raw fragment as its table",
                )),
            };
        }

        let table = match &join.table {
            JoinTable::Name(name) => self.fmt.wrap_table(name, join.schema.as_deref()),
            JoinTable::Raw(raw) => self.fmt.unwrap_raw(raw),
        };
        let mut sql = format!("{} join {table}", join.join_type.keyword());

        let mut first = true;
        for condition in join.conditions() {
            let Some(fragment) = self.join_condition(condition)? else {
                continue;
            };
            if first {
                sql.push_str(if condition.is_using() { " using " } else { " on " });
                first = false;
            } else {
                sql.push(' ');
                sql.push_str(condition.connector.as_str());
                sql.push(' ');
            }
            sql.push_str(&fragment);
        }
        Ok(sql)
    }

    /// Renders one join sub-clause; `None` when it contributes nothing.
    fn join_condition(&mut self, condition: &JoinCondition) -> Result<Option<String>> {
        let fragment = match &condition.kind {
            JoinConditionKind::OnBasic {
                column,
                operator,
                value,
            } => {
                let operator = self.fmt.operator(operator)?;
                format!(
                    "{}{} {operator} {}",
                    negate(condition, ""),
                    self.fmt.wrap(column),
                    self.fmt.wrap(value)
                )
            }
            JoinConditionKind::OnVal {
                column,
                operator,
                value,
            } => {
                let column = self.fmt.wrap(column);
                let operator = self.fmt.operator(operator)?;
                let value = self.fmt.operand(value);
                format!("{}{column} {operator} {value}", negate(condition, ""))
            }
            JoinConditionKind::OnIn { column, value } => self.in_fragment(condition, column, value),
            JoinConditionKind::OnNull { column } => self.null_fragment(condition, column),
            JoinConditionKind::OnExists { value } => self.exists_fragment(condition, value),
            JoinConditionKind::OnBetween { column, value } => {
                self.between_fragment(condition, column, value)
            }
            JoinConditionKind::OnWrapped { value } => {
                let inner = self.join_group(value)?;
                if inner.is_empty() {
                    return Ok(None);
                }
                format!("{}({inner})", negate(condition, ""))
            }
            JoinConditionKind::OnRaw { value } => {
                format!("{}{}", negate(condition, ""), self.fmt.unwrap_raw(value))
            }
            JoinConditionKind::OnUsing { column } => self.fmt.columnize(&column.to_vec()),
        };
        Ok(Some(fragment))
    }

    fn join_group(&mut self, conditions: &JoinConditions) -> Result<String> {
        let mut sql = String::new();
        for condition in conditions {
            let Some(fragment) = self.join_condition(condition)? else {
                continue;
            };
            if !sql.is_empty() {
                sql.push(' ');
                sql.push_str(condition.connector.as_str());
                sql.push(' ');
            }
            sql.push_str(&fragment);
        }
        Ok(sql)
    }
}
