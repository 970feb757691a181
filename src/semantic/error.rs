//! Errors raised while building or querying the semantic graph.
//!
//! These indicate a broken contract between the front end and the graph
//! (an edge committed twice, an edge attached to a node lacking the
//! capability). They are not user-data problems and abort the run.

use thiserror::Error;

use crate::graph::{EdgeIndex, NodeIndex};

/// Result type for semantic graph operations.
pub type SemanticResult<T> = Result<T, SemanticError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("node {0:?} does not exist")]
    NoSuchNode(NodeIndex),

    #[error("edge {0:?} does not exist")]
    NoSuchEdge(EdgeIndex),

    #[error("node {node:?} is not a {capability}")]
    MissingCapability {
        node: NodeIndex,
        capability: &'static str,
    },

    #[error("nameable {0:?} already has a defining edge")]
    AlreadyDefined(NodeIndex),

    #[error("instance {0:?} already belongs to a type")]
    AlreadyTyped(NodeIndex),

    #[error("instantiation {0:?} already instantiates a template")]
    AlreadyInstantiated(NodeIndex),

    #[error("edge {0:?} is not a naming edge")]
    NotANamesEdge(EdgeIndex),
}
