//! The semantic graph: construction API used by the front end and the
//! read-mostly query API used by the mapping engine.

use std::path::{Path, PathBuf};

use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::graph::{EdgeIndex, Location, NodeIndex};

use super::annotations::AnnotationValue;
use super::elements::{Access, NamesEdge, NamesKind, NodeKind, SemEdge, SemNode};
use super::error::{SemanticError, SemanticResult};

const ANONYMOUS: &str = "<anonymous>";

/// Semantic graph of one translation unit.
///
/// The unit node is created with the graph and acts as the global scope.
/// All other nodes are created by the front end through the `add_*`
/// methods and connected with the `new_*` edge methods.
#[derive(Debug)]
pub struct SemanticGraph {
    graph: StableDiGraph<SemNode, SemEdge>,
    unit: NodeIndex,
}

impl SemanticGraph {
    /// Create a graph holding only the translation unit for `file`.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let mut graph = StableDiGraph::new();
        let unit = graph.add_node(SemNode::new(NodeKind::Unit, Location::file_start(file)));
        Self { graph, unit }
    }

    /// The translation unit (global scope).
    pub fn unit(&self) -> NodeIndex {
        self.unit
    }

    /// Main file of the translation unit.
    pub fn file(&self) -> &Path {
        self.graph[self.unit].location().file()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a node of this graph.
    pub fn node(&self, n: NodeIndex) -> &SemNode {
        &self.graph[n]
    }

    /// Mutable access to a node, used by the front end to annotate it.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a node of this graph.
    pub fn node_mut(&mut self, n: NodeIndex) -> &mut SemNode {
        &mut self.graph[n]
    }

    pub fn get(&self, n: NodeIndex) -> Option<&SemNode> {
        self.graph.node_weight(n)
    }

    pub fn edge(&self, e: EdgeIndex) -> Option<&SemEdge> {
        self.graph.edge_weight(e)
    }

    /// Source and target of an edge.
    pub fn edge_endpoints(&self, e: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(e)
    }

    /// Attach a front-end annotation to a node.
    pub fn annotate(
        &mut self,
        n: NodeIndex,
        key: impl Into<String>,
        value: impl Into<AnnotationValue>,
    ) {
        self.graph[n].annotations_mut().set(key, value);
    }

    /// Attach a presence-only annotation to a node.
    pub fn flag(&mut self, n: NodeIndex, key: impl Into<String>) {
        self.graph[n].annotations_mut().flag(key);
    }
}

// ============================================================================
// Node Construction
// ============================================================================

impl SemanticGraph {
    pub fn add_node(&mut self, kind: NodeKind, location: Location) -> NodeIndex {
        self.graph.add_node(SemNode::new(kind, location))
    }

    pub fn add_namespace(&mut self, location: Location) -> NodeIndex {
        self.add_node(NodeKind::Namespace, location)
    }

    pub fn add_class(&mut self, location: Location) -> NodeIndex {
        self.add_node(NodeKind::Class, location)
    }

    pub fn add_data_member(&mut self, location: Location) -> NodeIndex {
        self.add_node(NodeKind::DataMember, location)
    }

    /// Built-in types have no source position; they are located at the
    /// start of the unit's file.
    pub fn add_fundamental(&mut self, name: impl Into<String>) -> NodeIndex {
        let location = Location::file_start(self.file());
        self.add_node(NodeKind::Fundamental { name: name.into() }, location)
    }

    pub fn add_qualifier(&mut self, location: Location, konst: bool, volatile: bool) -> NodeIndex {
        self.add_node(NodeKind::Qualifier { konst, volatile }, location)
    }

    pub fn add_type_template(&mut self, location: Location) -> NodeIndex {
        self.add_node(NodeKind::TypeTemplate, location)
    }

    pub fn add_type_instantiation(&mut self, location: Location, args: Vec<String>) -> NodeIndex {
        let n = self.add_node(NodeKind::TypeInstantiation, location);
        if let Some(facet) = self.graph[n].instantiation.as_mut() {
            facet.args = args;
        }
        n
    }

    pub fn add_unsupported(&mut self, location: Location, type_name: impl Into<String>) -> NodeIndex {
        self.add_node(
            NodeKind::Unsupported {
                type_name: type_name.into(),
            },
            location,
        )
    }
}

// ============================================================================
// Edge Construction
// ============================================================================

impl SemanticGraph {
    fn check_node(&self, n: NodeIndex) -> SemanticResult<&SemNode> {
        self.graph.node_weight(n).ok_or(SemanticError::NoSuchNode(n))
    }

    fn require(
        &self,
        n: NodeIndex,
        capability: &'static str,
        test: impl Fn(&SemNode) -> bool,
    ) -> SemanticResult<()> {
        if test(self.check_node(n)?) {
            Ok(())
        } else {
            Err(SemanticError::MissingCapability {
                node: n,
                capability,
            })
        }
    }

    /// Add a naming edge from `scope` to `nameable`.
    pub fn new_names(
        &mut self,
        scope: NodeIndex,
        nameable: NodeIndex,
        name: impl Into<String>,
        kind: NamesKind,
        access: Access,
    ) -> SemanticResult<EdgeIndex> {
        self.require(scope, "scope", SemNode::is_scope)?;
        self.require(nameable, "nameable", SemNode::is_nameable)?;

        if kind == NamesKind::Defines
            && self.graph[nameable]
                .nameable()
                .is_some_and(|f| f.defined.is_some())
        {
            return Err(SemanticError::AlreadyDefined(nameable));
        }

        let name = name.into();
        let edge = self.graph.add_edge(
            scope,
            nameable,
            SemEdge::Names(NamesEdge {
                name: name.clone(),
                access,
                kind,
                hint: None,
            }),
        );

        if let Some(index) = self.graph[scope].scope.as_mut() {
            index.push(name, edge);
        }
        if let Some(facet) = self.graph[nameable].nameable.as_mut() {
            match kind {
                NamesKind::Defines => facet.defined = Some(edge),
                NamesKind::Declares | NamesKind::Typedefs => facet.named.push(edge),
            }
        }

        Ok(edge)
    }

    /// Add a public defining edge.
    pub fn define(
        &mut self,
        scope: NodeIndex,
        nameable: NodeIndex,
        name: impl Into<String>,
    ) -> SemanticResult<EdgeIndex> {
        self.new_names(scope, nameable, name, NamesKind::Defines, Access::Public)
    }

    /// Name `type_` with an alias. `hint` points at the alias this one is
    /// defined in terms of, if any.
    pub fn typedef(
        &mut self,
        scope: NodeIndex,
        type_: NodeIndex,
        name: impl Into<String>,
        hint: Option<EdgeIndex>,
    ) -> SemanticResult<EdgeIndex> {
        self.require(type_, "type", SemNode::is_type)?;
        let edge = self.new_names(scope, type_, name, NamesKind::Typedefs, Access::Public)?;
        if let Some(SemEdge::Names(names)) = self.graph.edge_weight_mut(edge) {
            names.hint = hint;
        }
        Ok(edge)
    }

    /// Remove a naming edge, keeping the scope and nameable indices in sync.
    pub fn remove_names(&mut self, edge: EdgeIndex) -> SemanticResult<()> {
        let (scope, nameable) = self
            .graph
            .edge_endpoints(edge)
            .ok_or(SemanticError::NoSuchEdge(edge))?;
        if self.names_edge(edge).is_none() {
            return Err(SemanticError::NotANamesEdge(edge));
        }

        if let Some(index) = self.graph[scope].scope.as_mut() {
            index.remove(edge);
        }
        if let Some(facet) = self.graph[nameable].nameable.as_mut() {
            if facet.defined == Some(edge) {
                facet.defined = None;
            }
            facet.named.retain(|e| *e != edge);
        }

        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Bind an instance to its type. `hint` is the alias the declaration
    /// used to spell the type.
    pub fn new_belongs(
        &mut self,
        instance: NodeIndex,
        type_: NodeIndex,
        hint: Option<EdgeIndex>,
    ) -> SemanticResult<EdgeIndex> {
        self.require(instance, "instance", SemNode::is_instance)?;
        self.require(type_, "type", SemNode::is_type)?;

        if self.graph[instance]
            .instance()
            .is_some_and(|f| f.belongs.is_some())
        {
            return Err(SemanticError::AlreadyTyped(instance));
        }

        let edge = self
            .graph
            .add_edge(instance, type_, SemEdge::Belongs { hint });
        if let Some(facet) = self.graph[instance].instance.as_mut() {
            facet.belongs = Some(edge);
        }
        Ok(edge)
    }

    pub fn new_qualifies(
        &mut self,
        qualifier: NodeIndex,
        type_: NodeIndex,
        hint: Option<EdgeIndex>,
    ) -> SemanticResult<EdgeIndex> {
        self.require(qualifier, "qualifier", |n| {
            matches!(n.kind(), NodeKind::Qualifier { .. })
        })?;
        self.require(type_, "type", SemNode::is_type)?;

        let edge = self
            .graph
            .add_edge(qualifier, type_, SemEdge::Qualifies { hint });
        if let Some(facet) = self.graph[type_].type_.as_mut() {
            facet.qualified.push(edge);
        }
        Ok(edge)
    }

    pub fn new_instantiates(
        &mut self,
        instantiation: NodeIndex,
        template: NodeIndex,
    ) -> SemanticResult<EdgeIndex> {
        self.require(instantiation, "instantiation", SemNode::is_instantiation)?;
        self.require(template, "template", |n| {
            matches!(n.kind(), NodeKind::Template | NodeKind::TypeTemplate)
        })?;

        if self.graph[instantiation]
            .instantiation()
            .is_some_and(|f| f.instantiates.is_some())
        {
            return Err(SemanticError::AlreadyInstantiated(instantiation));
        }

        let edge = self
            .graph
            .add_edge(instantiation, template, SemEdge::Instantiates);
        if let Some(facet) = self.graph[instantiation].instantiation.as_mut() {
            facet.instantiates = Some(edge);
        }
        Ok(edge)
    }

    pub fn new_inherits(
        &mut self,
        derived: NodeIndex,
        base: NodeIndex,
        access: Access,
        virtual_: bool,
    ) -> SemanticResult<EdgeIndex> {
        self.require(derived, "class", SemNode::is_class)?;
        self.require(base, "class", SemNode::is_class)?;
        Ok(self
            .graph
            .add_edge(derived, base, SemEdge::Inherits { access, virtual_ }))
    }
}

// ============================================================================
// Naming Queries
// ============================================================================

impl SemanticGraph {
    pub fn names_edge(&self, e: EdgeIndex) -> Option<&NamesEdge> {
        self.graph.edge_weight(e).and_then(SemEdge::as_names)
    }

    /// Scope that a naming edge belongs to.
    pub fn names_scope(&self, e: EdgeIndex) -> Option<NodeIndex> {
        self.names_edge(e)?;
        self.graph.edge_endpoints(e).map(|(s, _)| s)
    }

    /// Node that a naming edge names.
    pub fn names_named(&self, e: EdgeIndex) -> Option<NodeIndex> {
        self.names_edge(e)?;
        self.graph.edge_endpoints(e).map(|(_, n)| n)
    }

    /// Canonical naming edge of a node.
    pub fn named(&self, n: NodeIndex) -> Option<EdgeIndex> {
        self.graph[n].nameable().and_then(|f| f.canonical())
    }

    pub fn named_p(&self, n: NodeIndex) -> bool {
        self.graph[n].nameable().is_some_and(|f| f.is_named())
    }

    /// Enclosing scope of a named node.
    pub fn scope_of(&self, n: NodeIndex) -> Option<NodeIndex> {
        self.named(n).and_then(|e| self.names_scope(e))
    }

    pub fn is_global_scope(&self, n: NodeIndex) -> bool {
        n == self.unit
    }

    /// Unqualified name: the defining name, else the first name, else a
    /// literal name (qualified type, template-id), else `<anonymous>`.
    pub fn name(&self, n: NodeIndex) -> String {
        if let Some(names) = self.named(n).and_then(|e| self.names_edge(e)) {
            return names.name.clone();
        }
        self.literal_name(n, false)
    }

    /// True if the node has no name and no literal name can stand in.
    pub fn anonymous(&self, n: NodeIndex) -> bool {
        if self.named_p(n) {
            return false;
        }

        match self.graph[n].kind() {
            NodeKind::Unit | NodeKind::Fundamental { .. } | NodeKind::Unsupported { .. } => false,
            NodeKind::Qualifier { .. } => self.qualifier_base(n).map_or(true, |b| self.anonymous(b)),
            NodeKind::TypeInstantiation => self.template_of(n).map_or(true, |t| self.anonymous(t)),
            _ => true,
        }
    }

    /// True if the node or any enclosing scope up to the global scope is
    /// anonymous.
    pub fn fq_anonymous(&self, n: NodeIndex) -> bool {
        if self.anonymous(n) {
            return true;
        }
        match self.scope_of(n) {
            Some(s) if !self.is_global_scope(s) => self.fq_anonymous(s),
            _ => false,
        }
    }

    /// Fully-qualified name (`::ns::name`).
    pub fn fq_name(&self, n: NodeIndex) -> String {
        self.fq_name_hint(n, None)
    }

    /// Fully-qualified name spelled through `hint` instead of the node's
    /// canonical naming edge.
    pub fn fq_name_hint(&self, n: NodeIndex, hint: Option<EdgeIndex>) -> String {
        match self.graph[n].kind() {
            NodeKind::Unit => return String::new(),
            NodeKind::Fundamental { name } if hint.is_none() => return name.clone(),
            _ => {}
        }

        let edge = hint.or_else(|| self.named(n));
        let parts = edge.and_then(|e| Some((self.names_scope(e)?, self.names_edge(e)?)));

        match parts {
            Some((scope, names)) if self.is_global_scope(scope) => format!("::{}", names.name),
            Some((scope, names)) => format!("{}::{}", self.fq_name(scope), names.name),
            None => self.literal_name(n, true),
        }
    }

    fn literal_name(&self, n: NodeIndex, fq: bool) -> String {
        let spell = |t: NodeIndex| if fq { self.fq_name(t) } else { self.name(t) };

        match self.graph[n].kind() {
            NodeKind::Fundamental { name } => name.clone(),
            NodeKind::Unsupported { type_name } => type_name.clone(),
            NodeKind::Qualifier { konst, volatile } => {
                let mut r = String::new();
                if *konst {
                    r.push_str("const ");
                }
                if *volatile {
                    r.push_str("volatile ");
                }
                match self.qualifier_base(n) {
                    Some(base) => r.push_str(&spell(base)),
                    None => r.push_str(ANONYMOUS),
                }
                r
            }
            NodeKind::TypeInstantiation => {
                let template = self
                    .template_of(n)
                    .map(spell)
                    .unwrap_or_else(|| ANONYMOUS.to_string());
                format!("{}<{}>", template, self.template_args(n).join(", "))
            }
            _ => ANONYMOUS.to_string(),
        }
    }
}

// ============================================================================
// Scope Queries
// ============================================================================

impl SemanticGraph {
    /// Naming edges of a scope, in declaration order. Empty for non-scopes.
    pub fn scope_names(&self, scope: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph[scope]
            .scope()
            .into_iter()
            .flat_map(|index| index.iter())
    }

    /// Every edge declaring `name` in `scope`, in insertion order.
    pub fn find(&self, scope: NodeIndex, name: &str) -> &[EdgeIndex] {
        self.graph[scope]
            .scope()
            .map(|index| index.find(name))
            .unwrap_or(&[])
    }

    /// Position of a naming edge in its scope.
    pub fn find_position(&self, scope: NodeIndex, edge: EdgeIndex) -> Option<usize> {
        self.graph[scope].scope()?.position(edge)
    }

    /// Structural check that a scope's name index and edge list agree.
    pub fn scope_is_consistent(&self, scope: NodeIndex) -> bool {
        self.graph[scope]
            .scope()
            .map_or(true, |index| index.is_consistent())
    }

    /// Nodes named in `scope`, in declaration order.
    pub fn scope_members(&self, scope: NodeIndex) -> Vec<NodeIndex> {
        self.scope_names(scope)
            .filter_map(|e| self.names_named(e))
            .collect()
    }

    /// Data members of a class, in declaration order.
    pub fn data_members(&self, class: NodeIndex) -> Vec<NodeIndex> {
        self.scope_members(class)
            .into_iter()
            .filter(|m| self.graph[*m].is_data_member())
            .collect()
    }

    /// Direct base classes, in declaration order.
    pub fn bases(&self, class: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(class, Direction::Outgoing)
            .filter(|e| matches!(e.weight(), SemEdge::Inherits { .. }))
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, base)| base).collect()
    }

    /// All classes defined in the unit, walking namespaces and nested
    /// classes depth-first in declaration order. Each class appears once
    /// even if it is named more than once.
    pub fn classes(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        self.collect_classes(self.unit, &mut out);
        out
    }

    fn collect_classes(&self, scope: NodeIndex, out: &mut Vec<NodeIndex>) {
        for e in self.scope_names(scope) {
            let Some(n) = self.names_named(e) else {
                continue;
            };
            // Only follow the canonical name so aliases do not duplicate.
            if self.named(n) != Some(e) {
                continue;
            }
            match self.graph[n].kind() {
                NodeKind::Class => {
                    out.push(n);
                    self.collect_classes(n, out);
                }
                NodeKind::Namespace => self.collect_classes(n, out),
                _ => {}
            }
        }
    }
}

// ============================================================================
// Type and Instance Queries
// ============================================================================

impl SemanticGraph {
    /// Belongs edge of an instance.
    pub fn belongs(&self, instance: NodeIndex) -> Option<EdgeIndex> {
        self.graph[instance].instance()?.belongs
    }

    /// Type of an instance.
    pub fn type_of(&self, instance: NodeIndex) -> Option<NodeIndex> {
        self.belongs(instance)
            .and_then(|e| self.graph.edge_endpoints(e))
            .map(|(_, t)| t)
    }

    /// Naming hint recorded on an instance's belongs edge.
    pub fn belongs_hint(&self, instance: NodeIndex) -> Option<EdgeIndex> {
        self.belongs(instance)
            .and_then(|e| self.graph.edge_weight(e))
            .and_then(SemEdge::hint)
    }

    /// Next alias in a naming-hint chain.
    pub fn next_hint(&self, hint: EdgeIndex) -> Option<EdgeIndex> {
        self.names_edge(hint).and_then(|n| n.hint)
    }

    /// Qualifies edges pointing at a type.
    pub fn qualified(&self, type_: NodeIndex) -> &[EdgeIndex] {
        self.graph[type_]
            .type_facet()
            .map(|f| f.qualified.as_slice())
            .unwrap_or(&[])
    }

    /// Type a qualifier node qualifies.
    pub fn qualifier_base(&self, qualifier: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(qualifier, Direction::Outgoing)
            .find(|e| matches!(e.weight(), SemEdge::Qualifies { .. }))
            .map(|e| e.target())
    }

    /// Template an instantiation was produced from.
    pub fn template_of(&self, instantiation: NodeIndex) -> Option<NodeIndex> {
        let edge = self.graph[instantiation].instantiation()?.instantiates?;
        self.graph.edge_endpoints(edge).map(|(_, t)| t)
    }

    pub fn template_args(&self, instantiation: NodeIndex) -> &[String] {
        self.graph[instantiation]
            .instantiation()
            .map(|f| f.args.as_slice())
            .unwrap_or(&[])
    }

    /// Display name of an unsupported type sentinel.
    pub fn unsupported_type_name(&self, n: NodeIndex) -> Option<&str> {
        match self.graph[n].kind() {
            NodeKind::Unsupported { type_name } => Some(type_name),
            _ => None,
        }
    }
}
