//! `ARRAY JOIN` clause descriptors and their condition builder.

use serde::{Deserialize, Serialize};

use super::{BoolOp, Columns, InValues, Negatable, Operand, Raw};
use crate::value::{SqlValue, ToSqlValue};

/// How an array join is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayJoinType {
    /// `inner join`
    Inner,
    /// `left join`
    Left,
    /// A raw fragment embedded verbatim.
    Raw,
}

impl ArrayJoinType {
    /// Returns the keyword placed before `join`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Raw => "raw",
        }
    }
}

/// The joined source: a table name or a raw fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinTable {
    /// A raw fragment.
    Raw(Raw),
    /// A table name, quoted on output.
    Name(String),
}

/// The kind-specific part of a [`JoinCondition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JoinConditionKind {
    /// `column operator other_column`
    OnBasic {
        /// Left column.
        column: String,
        /// Comparison operator.
        operator: String,
        /// Right column.
        value: String,
    },
    /// `column operator ?`
    OnVal {
        /// Column name.
        column: String,
        /// Comparison operator.
        operator: String,
        /// Compared value.
        value: Operand,
    },
    /// `column in (...)`
    OnIn {
        /// Left side.
        column: Columns,
        /// Right side.
        value: InValues,
    },
    /// `column is null`
    OnNull {
        /// Column name.
        column: String,
    },
    /// `exists (subquery)`
    OnExists {
        /// The subquery.
        value: Raw,
    },
    /// `column between ? and ?`
    OnBetween {
        /// Column name.
        column: String,
        /// Lower and upper bound.
        value: [SqlValue; 2],
    },
    /// A parenthesized nested condition group.
    OnWrapped {
        /// Nested conditions.
        value: JoinConditions,
    },
    /// A raw fragment.
    OnRaw {
        /// The fragment.
        value: Raw,
    },
    /// `using col, ...`
    #[serde(alias = "using")]
    OnUsing {
        /// Shared column names.
        column: Columns,
    },
}

impl JoinConditionKind {
    /// Returns the `type` tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::OnBasic { .. } => "onBasic",
            Self::OnVal { .. } => "onVal",
            Self::OnIn { .. } => "onIn",
            Self::OnNull { .. } => "onNull",
            Self::OnExists { .. } => "onExists",
            Self::OnBetween { .. } => "onBetween",
            Self::OnWrapped { .. } => "onWrapped",
            Self::OnRaw { .. } => "onRaw",
            Self::OnUsing { .. } => "onUsing",
        }
    }
}

/// One `on` / `using` sub-clause of an array join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
    /// What the condition compares.
    #[serde(flatten)]
    pub kind: JoinConditionKind,
    /// Negation flag.
    #[serde(rename = "not", default)]
    pub negated: bool,
    /// Connector to the previous condition; ignored for the first one.
    #[serde(rename = "bool", default)]
    pub connector: BoolOp,
}

impl JoinCondition {
    /// Creates an `and`-connected, non-negated condition.
    #[must_use]
    pub const fn new(kind: JoinConditionKind) -> Self {
        Self {
            kind,
            negated: false,
            connector: BoolOp::And,
        }
    }

    /// Negates the condition.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Joins the condition to the previous one with `or`.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.connector = BoolOp::Or;
        self
    }

    /// Returns `true` for the column-list (`using`) form.
    #[must_use]
    pub const fn is_using(&self) -> bool {
        matches!(self.kind, JoinConditionKind::OnUsing { .. })
    }
}

impl Negatable for JoinCondition {
    fn is_negated(&self) -> bool {
        self.negated
    }
}

/// Position of a condition inside its owning [`JoinConditions`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionIndex(usize);

impl ConditionIndex {
    /// Returns the zero-based position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Ordered list of conditions owned by one array join.
///
/// Chaining helpers append to this list and hand back the list itself;
/// [`JoinConditions::push`] returns a [`ConditionIndex`] for later access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinConditions {
    conditions: Vec<JoinCondition>,
}

impl JoinConditions {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Appends a condition and returns its index.
    pub fn push(&mut self, condition: JoinCondition) -> ConditionIndex {
        self.conditions.push(condition);
        ConditionIndex(self.conditions.len() - 1)
    }

    /// Returns the condition at `index`.
    #[must_use]
    pub fn get(&self, index: ConditionIndex) -> Option<&JoinCondition> {
        self.conditions.get(index.0)
    }

    /// Returns the condition at `index` for modification.
    pub fn get_mut(&mut self, index: ConditionIndex) -> Option<&mut JoinCondition> {
        self.conditions.get_mut(index.0)
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` when no condition was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterates conditions in compilation order.
    pub fn iter(&self) -> std::slice::Iter<'_, JoinCondition> {
        self.conditions.iter()
    }

    fn append(&mut self, condition: JoinCondition) -> &mut Self {
        self.push(condition);
        self
    }

    /// `on first operator second`, joined with `and`.
    pub fn on(&mut self, first: &str, operator: &str, second: &str) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnBasic {
            column: String::from(first),
            operator: String::from(operator),
            value: String::from(second),
        }))
    }

    /// Same as [`JoinConditions::on`]; reads better in a chain.
    pub fn and_on(&mut self, first: &str, operator: &str, second: &str) -> &mut Self {
        self.on(first, operator, second)
    }

    /// `on first operator second`, joined with `or`.
    pub fn or_on(&mut self, first: &str, operator: &str, second: &str) -> &mut Self {
        self.append(
            JoinCondition::new(JoinConditionKind::OnBasic {
                column: String::from(first),
                operator: String::from(operator),
                value: String::from(second),
            })
            .or(),
        )
    }

    /// `on column operator ?`
    pub fn on_val<T: ToSqlValue>(&mut self, column: &str, operator: &str, value: T) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnVal {
            column: String::from(column),
            operator: String::from(operator),
            value: Operand::Value(value.to_sql_value()),
        }))
    }

    /// `on column in (?, ...)`
    pub fn on_in<T: ToSqlValue>(&mut self, column: &str, values: Vec<T>) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnIn {
            column: Columns::from(column),
            value: InValues::List(values.into_iter().map(ToSqlValue::to_sql_value).collect()),
        }))
    }

    /// `on column is null`
    pub fn on_null(&mut self, column: &str) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnNull {
            column: String::from(column),
        }))
    }

    /// `on column is not null`
    pub fn on_not_null(&mut self, column: &str) -> &mut Self {
        self.append(
            JoinCondition::new(JoinConditionKind::OnNull {
                column: String::from(column),
            })
            .not(),
        )
    }

    /// `on column between ? and ?`
    pub fn on_between<L: ToSqlValue, H: ToSqlValue>(
        &mut self,
        column: &str,
        low: L,
        high: H,
    ) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnBetween {
            column: String::from(column),
            value: [low.to_sql_value(), high.to_sql_value()],
        }))
    }

    /// `on exists (subquery)`
    pub fn on_exists(&mut self, subquery: Raw) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnExists {
            value: subquery,
        }))
    }

    /// `on <raw>`
    pub fn on_raw(&mut self, raw: Raw) -> &mut Self {
        self.append(JoinCondition::new(JoinConditionKind::OnRaw { value: raw }))
    }

    /// `on (<nested conditions>)`
    pub fn on_wrapped(&mut self, build: impl FnOnce(&mut Self)) -> &mut Self {
        let mut nested = Self::new();
        build(&mut nested);
        self.append(JoinCondition::new(JoinConditionKind::OnWrapped { value: nested }))
    }

    /// `using col, ...`
    pub fn using(&mut self, columns: &[&str]) -> &mut Self {
        let column = match columns {
            [single] => Columns::from(*single),
            _ => Columns::from(columns),
        };
        self.append(JoinCondition::new(JoinConditionKind::OnUsing { column }))
    }
}

impl<'a> IntoIterator for &'a JoinConditions {
    type Item = &'a JoinCondition;
    type IntoIter = std::slice::Iter<'a, JoinCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter()
    }
}

/// One `ARRAY JOIN` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayJoinClause {
    /// Joined table, or the raw fragment for [`ArrayJoinType::Raw`].
    pub table: JoinTable,
    /// Optional schema qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Join type.
    pub join_type: ArrayJoinType,
    #[serde(rename = "clauses", default)]
    conditions: JoinConditions,
}

impl ArrayJoinClause {
    /// Creates an array join with no conditions yet.
    pub fn new(table: impl Into<String>, join_type: ArrayJoinType, schema: Option<&str>) -> Self {
        Self {
            table: JoinTable::Name(table.into()),
            schema: schema.map(String::from),
            join_type,
            conditions: JoinConditions::new(),
        }
    }

    /// Creates a raw array join, embedded verbatim.
    #[must_use]
    pub const fn raw(raw: Raw) -> Self {
        Self {
            table: JoinTable::Raw(raw),
            schema: None,
            join_type: ArrayJoinType::Raw,
            conditions: JoinConditions::new(),
        }
    }

    /// Returns the condition list.
    #[must_use]
    pub const fn conditions(&self) -> &JoinConditions {
        &self.conditions
    }

    /// Returns the condition list for appending.
    pub fn conditions_mut(&mut self) -> &mut JoinConditions {
        &mut self.conditions
    }

    /// Builds the condition list in a closure and returns the clause.
    ///
    /// ```rust
    /// use oxide_sql_clickhouse::clause::{ArrayJoinClause, ArrayJoinType};
    ///
    /// let join = ArrayJoinClause::new("arr", ArrayJoinType::Left, None)
    ///     .with_conditions(|on| {
    ///         on.on("arr.id", "=", "t.id").on_val("arr.kind", "=", "tag");
    ///     });
    /// assert_eq!(join.conditions().len(), 2);
    /// ```
    #[must_use]
    pub fn with_conditions(mut self, build: impl FnOnce(&mut JoinConditions)) -> Self {
        build(&mut self.conditions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_empty() {
        let join = ArrayJoinClause::new("arr", ArrayJoinType::Inner, Some("db"));
        assert!(join.conditions().is_empty());
        assert_eq!(join.schema.as_deref(), Some("db"));
        assert_eq!(join.table, JoinTable::Name(String::from("arr")));
    }

    #[test]
    fn test_push_returns_index_into_owner() {
        let mut join = ArrayJoinClause::new("arr", ArrayJoinType::Left, None);
        join.conditions_mut().on("a", "=", "b");
        let index = join.conditions_mut().push(JoinCondition::new(JoinConditionKind::OnNull {
            column: String::from("c"),
        }));
        assert_eq!(index.get(), 1);

        if let Some(condition) = join.conditions_mut().get_mut(index) {
            condition.negated = true;
        }
        let condition = join.conditions().get(index).unwrap();
        assert!(condition.negated);
        assert_eq!(join.conditions().len(), 2);
    }

    #[test]
    fn test_chaining_keeps_order() {
        let join = ArrayJoinClause::new("arr", ArrayJoinType::Left, None).with_conditions(|on| {
            on.using(&["id"]).or_on("a", "=", "b").on_null("c");
        });
        let tags: Vec<&str> = join.conditions().iter().map(|c| c.kind.tag()).collect();
        assert_eq!(tags, vec!["onUsing", "onBasic", "onNull"]);
        assert_eq!(join.conditions().get(ConditionIndex(1)).unwrap().connector, BoolOp::Or);
    }

    #[test]
    fn test_deserialize_using_alias() {
        let join: ArrayJoinClause = serde_json::from_str(
            r#"{"joinType": "left", "table": "arr", "clauses": [{"type": "using", "column": "id"}]}"#,
        )
        .unwrap();
        assert!(join.conditions().iter().next().unwrap().is_using());
    }

    #[test]
    fn test_deserialize_raw_table() {
        let join: ArrayJoinClause = serde_json::from_str(
            r#"{"joinType": "raw", "table": {"sql": "array join arr as a"}}"#,
        )
        .unwrap();
        assert_eq!(join.table, JoinTable::Raw(Raw::new("array join arr as a")));
    }
}
