use thiserror::Error;

/// Convenience result type for virtual-column operations.
pub type VirtualColumnResult<T> = Result<T, VirtualColumnError>;

/// Reason a virtual-column rule was rejected.
///
/// The sentinel entrypoints (e.g. [`crate::processing::add_virtual_column`]) collapse every
/// variant into an empty dataset; the `try_*` entrypoints return it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VirtualColumnError {
    /// The name requested for the new column is empty, has no `_`, or uses a character outside
    /// `[A-Za-z0-9_]`.
    #[error("invalid new column name '{name}': {reason}")]
    InvalidNewColumnName { name: String, reason: &'static str },

    /// The rule contains a character outside letters, digits, `_`, space and `+ - *`.
    #[error("invalid character '{character}' at position {position} in rule")]
    InvalidRuleCharacter { character: char, position: usize },

    /// The rule does not contain exactly one kind of operator.
    #[error("rule must contain exactly one operator kind, found {found}")]
    AmbiguousOrMissingOperator { found: usize },

    /// Splitting on the operator did not give two non-empty operands.
    #[error("rule '{rule}' does not have exactly two non-empty operands")]
    MalformedOperands { rule: String },

    /// An operand names a column the dataset does not have.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A column already in the dataset contains an operator character.
    #[error("existing column '{column}' contains an operator character")]
    UnsafeExistingColumnName { column: String },

    /// The columnar backend failed to evaluate an otherwise valid rule.
    #[error("backend error: {message}")]
    Backend { message: String },
}
