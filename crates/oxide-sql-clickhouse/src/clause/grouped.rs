//! Clauses grouped by category.

use serde::{Deserialize, Serialize};

use super::{ArrayJoinClause, Raw, WhereClause};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `asc`
    #[default]
    Asc,
    /// `desc`
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One `order by` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OrderClause {
    /// `column direction`
    Basic {
        /// Column name.
        column: String,
        /// Sort direction.
        #[serde(default)]
        direction: Direction,
    },
    /// A raw ordering expression.
    Raw {
        /// The fragment.
        value: Raw,
    },
}

impl OrderClause {
    /// Ascending order on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::Basic {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending order on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::Basic {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

/// One `group by` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GroupClause {
    /// A column.
    Basic {
        /// Column name.
        column: String,
    },
    /// A raw grouping expression.
    Raw {
        /// The fragment.
        value: Raw,
    },
}

/// Clause lists keyed by category.
///
/// Insertion order inside each list is compilation order. A category that
/// is missing from a JSON document deserializes as an empty list, and empty
/// lists compile to empty fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupedClauses {
    /// `arrayJoin` category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub array_join: Vec<ArrayJoinClause>,
    /// `prewhere` category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prewhere: Vec<WhereClause>,
    /// `where` category.
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub wheres: Vec<WhereClause>,
    /// `group` category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<GroupClause>,
    /// `order` category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderClause>,
}
