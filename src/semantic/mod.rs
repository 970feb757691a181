//! Object-language semantic graph.
//!
//! The front end populates this graph from parsed source: scopes
//! (translation unit, namespaces, classes), nameable entities, types,
//! typed instances (data members) and templates. The mapping engine
//! reads it and caches derived facts on its nodes.
//!
//! Nodes compose capabilities instead of inheriting them:
//!
//! | Kind | nameable | scope | type | instance | instantiation |
//! |------|:--------:|:-----:|:----:|:--------:|:-------------:|
//! | unit | | ✓ | | | |
//! | namespace | ✓ | ✓ | | | |
//! | class | ✓ | ✓ | ✓ | | |
//! | fundamental, qualifier, unsupported | ✓ | | ✓ | | |
//! | type instantiation | ✓ | | ✓ | | ✓ |
//! | data member | ✓ | | | ✓ | |

pub mod annotations;
mod elements;
mod error;
mod semantic_graph;


pub use annotations::{keyed, keys, AnnotationValue, Annotations};
pub use elements::{
    Access, EdgeKind, InstanceFacet, InstantiationFacet, NameableFacet, NamesEdge, NamesKind,
    NodeKind, SemEdge, SemNode, TypeFacet,
};
pub use error::{SemanticError, SemanticResult};
pub use semantic_graph::SemanticGraph;
