//! Graph primitives shared by the semantic and relational graphs.
//!
//! Both graphs are arena-indexed: nodes and edges live in a petgraph
//! `StableDiGraph`, so indices stay valid when naming edges are removed
//! from a scope. This module provides the pieces that are not specific
//! to either graph:
//!
//! - [`Location`] - source position carried by semantic nodes
//! - [`ScopeIndex`] - ordered, multi-valued name index used by scopes
//! - [`FactCache`] - write-once memo of derived facts per node

mod facts;
mod location;
mod scope_index;

pub use facts::{ColumnDirection, Fact, FactCache};
pub use location::Location;
pub use scope_index::ScopeIndex;

pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
