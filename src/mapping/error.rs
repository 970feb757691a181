//! Mapping engine errors.

use thiserror::Error;

use crate::config::SettingsError;
use crate::graph::{Location, NodeIndex};
use crate::relational::RelationalError;

/// Result type for mapping queries.
pub type MappingResult<T> = Result<T, MappingError>;

#[derive(Debug, Error)]
pub enum MappingError {
    /// No database type is known for a member's type.
    #[error("unable to map type '{type_name}' to a database type")]
    UnmappedType {
        type_name: String,
        location: Location,
    },

    /// The member's type has no relational representation.
    #[error("type '{type_name}' cannot be persisted")]
    UnsupportedType {
        type_name: String,
        location: Location,
    },

    /// A persistent class without an identity member, where one is
    /// required.
    #[error("class '{class_name}' has no object id member")]
    MissingIdMember {
        class_name: String,
        location: Location,
    },

    /// The graph breaks a front-end contract (an instance with no type, a
    /// container without a value type).
    #[error("node {node:?}: {message}")]
    Internal { node: NodeIndex, message: String },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Name conflicts are collected by the schema builder; anything
    /// that reaches here is a misuse of the relational graph.
    #[error(transparent)]
    Relational(#[from] RelationalError),
}

impl MappingError {
    pub(crate) fn internal(node: NodeIndex, message: impl Into<String>) -> Self {
        MappingError::Internal {
            node,
            message: message.into(),
        }
    }

    /// Fatal errors abort the run; the rest are reported against a source
    /// location and can be collected.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MappingError::MissingIdMember { .. }
                | MappingError::Internal { .. }
                | MappingError::Settings(_)
                | MappingError::Relational(_)
        )
    }

    /// Source location the error should be reported at.
    pub fn location(&self) -> Option<&Location> {
        match self {
            MappingError::UnmappedType { location, .. }
            | MappingError::UnsupportedType { location, .. }
            | MappingError::MissingIdMember { location, .. } => Some(location),
            MappingError::Internal { .. }
            | MappingError::Settings(_)
            | MappingError::Relational(_) => None,
        }
    }
}
