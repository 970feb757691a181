//! Mapping & naming engine.
//!
//! Derives relational facts from an annotated [`SemanticGraph`]: table and
//! column names, nullability, database types, column options, column
//! counts, identity members and containment queries. Everything goes
//! through an explicit [`Context`] that borrows the graph and settings;
//! there is no process-wide state, so two contexts over two graphs never
//! interfere.
//!
//! Derived facts that are expensive or must stay stable (composite value,
//! column counts, identity member) are memoized in each node's
//! [`FactCache`](crate::graph::FactCache).
//!
//! # Example
//!
//! ```ignore
//! let settings = Settings::default();
//! let ctx = Context::new(&graph, &settings)?;
//! let table = ctx.table_name(person);
//! let build = ctx.build_schema()?;
//! ```

mod classify;
mod containment;
mod counting;
mod error;
mod naming;
mod nullability;
mod options;
mod resolve;
mod schema;
mod traversal;
mod type_map;

pub use classify::{ClassKind, ContainerKind};
pub use containment::MemberTest;
pub use error::{MappingError, MappingResult};
pub use naming::TablePrefix;
pub use resolve::{ResolvedClass, ResolvedColumn, ResolvedContainer};
pub use schema::{SchemaBuild, SchemaConflict};
pub use traversal::{walk_class, MemberVisitor};
pub use type_map::{MappedType, TypeMap};

use crate::config::Settings;
use crate::graph::{Location, NodeIndex};
use crate::ident::KeywordSet;
use crate::semantic::{Annotations, SemanticGraph};
use crate::sql::Dialect;

/// Explicit handle for one mapping run.
///
/// Holds the semantic graph, the settings it was created with, the type
/// map built from the target dialect plus settings overrides, and the set
/// of reserved words names are escaped against.
#[derive(Debug)]
pub struct Context<'g> {
    graph: &'g SemanticGraph,
    settings: &'g Settings,
    type_map: TypeMap,
    keywords: KeywordSet,
    schema: Option<String>,
}

impl<'g> Context<'g> {
    /// Create a context, populating the type map once.
    pub fn new(graph: &'g SemanticGraph, settings: &'g Settings) -> MappingResult<Self> {
        let type_map = TypeMap::new(settings.database, &settings.type_map);
        let schema = settings.resolved_schema()?;

        log::debug!(
            database = settings.database.to_string(),
            types = type_map.len();
            "Mapping context created"
        );

        Ok(Self {
            graph,
            settings,
            type_map,
            keywords: settings.keyword_set(),
            schema,
        })
    }

    pub fn graph(&self) -> &'g SemanticGraph {
        self.graph
    }

    pub fn settings(&self) -> &'g Settings {
        self.settings
    }

    pub fn dialect(&self) -> Dialect {
        self.settings.database
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Resolved schema qualifier, if any.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub(crate) fn annotations(&self, n: NodeIndex) -> &'g Annotations {
        self.graph.node(n).annotations()
    }

    pub(crate) fn location(&self, n: NodeIndex) -> Location {
        self.graph.node(n).location().clone()
    }
}
