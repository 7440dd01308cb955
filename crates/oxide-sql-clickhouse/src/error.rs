//! Error types for clause compilation.

/// Errors that stop a statement from being compiled.
///
/// All variants except [`CompileError::UndefinedBinding`] are construction
/// errors: the clause tree handed to the compiler cannot be rendered, and no
/// SQL is returned for it.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A clause descriptor has an inconsistent shape.
    #[error("Invalid {kind} clause: {message}")]
    InvalidClause {
        /// Clause kind, as tagged in the clause tree.
        kind: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A comparison uses an operator the dialect does not allow.
    #[error("The operator \"{0}\" is not permitted")]
    OperatorNotPermitted(String),

    /// The clause tree could not be decoded, e.g. an unknown `type` tag.
    #[error("Malformed clause tree: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The statement has no target table.
    #[error("Statement requires a table name")]
    MissingTable,

    /// An UPDATE without assignments.
    #[error("Update statement has no assignments")]
    EmptyUpdate,

    /// A compiled statement still carries an undefined value.
    #[error("Undefined binding(s) detected when compiling: {sql}")]
    UndefinedBinding {
        /// The SQL that would have been executed.
        sql: String,
    },
}

impl CompileError {
    /// Creates an invalid clause error.
    pub fn invalid(kind: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidClause {
            kind,
            message: message.into(),
        }
    }

    /// Returns `true` when the clause tree itself is at fault.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        !matches!(self, Self::UndefinedBinding { .. })
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
