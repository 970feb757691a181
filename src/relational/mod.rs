//! Relational schema graph.
//!
//! Mirrors the semantic graph's scope/nameable structure for tables,
//! columns and keys. Names are unique per scope; a collision is reported
//! as a [`DuplicateName`] value rather than aborting, so a whole run's
//! conflicts can be collected.
//!
//! Every nameable carries a correlation id naming the semantic entity it
//! was derived from. Together with the node kind it identifies the node
//! within its scope, which lets two versions of a schema be matched up.

mod elements;
mod error;
mod name;
mod relational_graph;


pub use elements::{RelEdge, RelKind, RelNode, RelScope};
pub use error::{DuplicateName, RelationalError, RelationalResult};
pub use name::{NameRepr, QName, UName};
pub use relational_graph::RelationalGraph;
