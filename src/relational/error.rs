//! Relational graph errors.

use thiserror::Error;

use crate::graph::NodeIndex;

/// Result type for relational graph operations.
pub type RelationalResult<T> = Result<T, RelationalError>;

/// Two nameables in one scope would receive the same name.
///
/// This is a reportable conflict, not an abort: callers collect these and
/// report them together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate name '{name}' in scope {scope:?}: {orig:?} and {dup:?}")]
pub struct DuplicateName {
    pub scope: NodeIndex,
    pub orig: NodeIndex,
    pub dup: NodeIndex,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationalError {
    #[error(transparent)]
    DuplicateName(#[from] DuplicateName),

    #[error("node {0:?} does not exist")]
    NoSuchNode(NodeIndex),

    #[error("node {node:?} is not a {repr} scope")]
    NotAScope { node: NodeIndex, repr: &'static str },

    #[error("node {node:?} cannot carry a {repr} name")]
    NotNameable { node: NodeIndex, repr: &'static str },

    #[error("node {0:?} is already named")]
    AlreadyNamed(NodeIndex),

    #[error("contains edge from {key:?} to {column:?} must link a key to a column")]
    InvalidContains { key: NodeIndex, column: NodeIndex },
}

impl RelationalError {
    /// Conflicts are collected; everything else is a contract violation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RelationalError::DuplicateName(_))
    }

    pub fn as_duplicate(&self) -> Option<&DuplicateName> {
        match self {
            RelationalError::DuplicateName(d) => Some(d),
            _ => None,
        }
    }
}
