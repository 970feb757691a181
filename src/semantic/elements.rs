//! Node and edge types of the semantic graph.
//!
//! Object-language entities compose several capabilities: a data member
//! is both nameable and an instance, a class is a scope and a type, a
//! type instantiation is a type and an instantiation. Rather than a
//! class hierarchy, every [`SemNode`] carries a kind tag plus the optional
//! facets its kind implies; capability tests look at the facets.

use std::fmt;

use crate::graph::{EdgeIndex, FactCache, Location, ScopeIndex};

use super::annotations::Annotations;

// ============================================================================
// Supporting Enums
// ============================================================================

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavour of a naming edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamesKind {
    /// Declaration without definition.
    Declares,
    /// Defining declaration; preferred when a node has several names.
    Defines,
    /// Type alias.
    Typedefs,
}

/// Kind of a semantic node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Translation unit; doubles as the global scope.
    Unit,
    Namespace,
    Class,
    /// Built-in type such as `int` or `bool`.
    Fundamental { name: String },
    /// cv-qualified version of another type.
    Qualifier { konst: bool, volatile: bool },
    Template,
    TypeTemplate,
    /// Type produced by instantiating a type template.
    TypeInstantiation,
    DataMember,
    /// Sentinel for a type that has no relational representation.
    Unsupported { type_name: String },
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Unit => "unit",
            NodeKind::Namespace => "namespace",
            NodeKind::Class => "class",
            NodeKind::Fundamental { .. } => "fundamental type",
            NodeKind::Qualifier { .. } => "qualifier",
            NodeKind::Template => "template",
            NodeKind::TypeTemplate => "type template",
            NodeKind::TypeInstantiation => "type instantiation",
            NodeKind::DataMember => "data member",
            NodeKind::Unsupported { .. } => "unsupported type",
        }
    }

    fn is_nameable(&self) -> bool {
        !matches!(self, NodeKind::Unit)
    }

    fn is_scope(&self) -> bool {
        matches!(self, NodeKind::Unit | NodeKind::Namespace | NodeKind::Class)
    }

    fn is_type(&self) -> bool {
        matches!(
            self,
            NodeKind::Class
                | NodeKind::Fundamental { .. }
                | NodeKind::Qualifier { .. }
                | NodeKind::TypeInstantiation
                | NodeKind::Unsupported { .. }
        )
    }

    fn is_instance(&self) -> bool {
        matches!(self, NodeKind::DataMember)
    }

    fn is_instantiation(&self) -> bool {
        matches!(self, NodeKind::TypeInstantiation)
    }
}

// ============================================================================
// Facets
// ============================================================================

/// Incoming naming edges of a nameable node.
#[derive(Debug, Clone, Default)]
pub struct NameableFacet {
    pub(crate) defined: Option<EdgeIndex>,
    pub(crate) named: Vec<EdgeIndex>,
}

impl NameableFacet {
    /// The canonical naming edge: the defining edge if any, else the first.
    pub fn canonical(&self) -> Option<EdgeIndex> {
        self.defined.or_else(|| self.named.first().copied())
    }

    pub fn is_named(&self) -> bool {
        self.defined.is_some() || !self.named.is_empty()
    }

    /// All naming edges, defining edge first.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.defined.into_iter().chain(self.named.iter().copied())
    }
}

/// Incoming qualification edges of a type.
#[derive(Debug, Clone, Default)]
pub struct TypeFacet {
    pub(crate) qualified: Vec<EdgeIndex>,
}

/// The belongs edge of an instance.
#[derive(Debug, Clone, Default)]
pub struct InstanceFacet {
    pub(crate) belongs: Option<EdgeIndex>,
}

/// The instantiates edge and template arguments of an instantiation.
#[derive(Debug, Clone, Default)]
pub struct InstantiationFacet {
    pub(crate) instantiates: Option<EdgeIndex>,
    pub(crate) args: Vec<String>,
}

// ============================================================================
// Nodes
// ============================================================================

/// A semantic graph node.
#[derive(Debug)]
pub struct SemNode {
    kind: NodeKind,
    location: Location,
    annotations: Annotations,
    facts: FactCache,
    pub(crate) nameable: Option<NameableFacet>,
    pub(crate) scope: Option<ScopeIndex<String>>,
    pub(crate) type_: Option<TypeFacet>,
    pub(crate) instance: Option<InstanceFacet>,
    pub(crate) instantiation: Option<InstantiationFacet>,
}

impl SemNode {
    pub(crate) fn new(kind: NodeKind, location: Location) -> Self {
        Self {
            nameable: kind.is_nameable().then(NameableFacet::default),
            scope: kind.is_scope().then(ScopeIndex::new),
            type_: kind.is_type().then(TypeFacet::default),
            instance: kind.is_instance().then(InstanceFacet::default),
            instantiation: kind.is_instantiation().then(InstantiationFacet::default),
            kind,
            location,
            annotations: Annotations::new(),
            facts: FactCache::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    pub fn facts(&self) -> &FactCache {
        &self.facts
    }

    pub fn is_nameable(&self) -> bool {
        self.nameable.is_some()
    }

    pub fn is_scope(&self) -> bool {
        self.scope.is_some()
    }

    pub fn is_type(&self) -> bool {
        self.type_.is_some()
    }

    pub fn is_instance(&self) -> bool {
        self.instance.is_some()
    }

    pub fn is_instantiation(&self) -> bool {
        self.instantiation.is_some()
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, NodeKind::Class)
    }

    pub fn is_data_member(&self) -> bool {
        matches!(self.kind, NodeKind::DataMember)
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, NodeKind::Unsupported { .. })
    }

    pub fn nameable(&self) -> Option<&NameableFacet> {
        self.nameable.as_ref()
    }

    pub fn scope(&self) -> Option<&ScopeIndex<String>> {
        self.scope.as_ref()
    }

    pub fn type_facet(&self) -> Option<&TypeFacet> {
        self.type_.as_ref()
    }

    pub fn instance(&self) -> Option<&InstanceFacet> {
        self.instance.as_ref()
    }

    pub fn instantiation(&self) -> Option<&InstantiationFacet> {
        self.instantiation.as_ref()
    }
}

// ============================================================================
// Edges
// ============================================================================

/// Scope → nameable naming edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesEdge {
    pub name: String,
    pub access: Access,
    pub kind: NamesKind,
    /// Next alias in a typedef chain.
    pub hint: Option<EdgeIndex>,
}

/// Variant tag of a [`SemEdge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Names,
    Belongs,
    Qualifies,
    Instantiates,
    Inherits,
}

/// A semantic graph edge.
///
/// Directions: names (scope → nameable), belongs (instance → type),
/// qualifies (qualifier → type), instantiates (instantiation →
/// template), inherits (derived → base).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemEdge {
    Names(NamesEdge),
    Belongs { hint: Option<EdgeIndex> },
    Qualifies { hint: Option<EdgeIndex> },
    Instantiates,
    Inherits { access: Access, virtual_: bool },
}

impl SemEdge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            SemEdge::Names(_) => EdgeKind::Names,
            SemEdge::Belongs { .. } => EdgeKind::Belongs,
            SemEdge::Qualifies { .. } => EdgeKind::Qualifies,
            SemEdge::Instantiates => EdgeKind::Instantiates,
            SemEdge::Inherits { .. } => EdgeKind::Inherits,
        }
    }

    pub fn is_a(&self, kind: EdgeKind) -> bool {
        self.kind() == kind
    }

    pub fn as_names(&self) -> Option<&NamesEdge> {
        match self {
            SemEdge::Names(n) => Some(n),
            _ => None,
        }
    }

    /// Naming hint carried by belongs/qualifies/typedef edges.
    pub fn hint(&self) -> Option<EdgeIndex> {
        match self {
            SemEdge::Names(n) => n.hint,
            SemEdge::Belongs { hint } | SemEdge::Qualifies { hint } => *hint,
            _ => None,
        }
    }
}
