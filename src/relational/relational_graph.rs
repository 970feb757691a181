//! The relational schema graph.

use petgraph::stable_graph::StableDiGraph;

use crate::graph::{EdgeIndex, NodeIndex};

use super::elements::{RelEdge, RelKind, RelNode};
use super::error::{DuplicateName, RelationalError, RelationalResult};
use super::name::{NameRepr, QName, UName};

/// Relational schema: a model scope of tables, each a scope of columns
/// followed by keys.
#[derive(Debug, Clone)]
pub struct RelationalGraph {
    graph: StableDiGraph<RelNode, RelEdge>,
    model: NodeIndex,
}

impl Default for RelationalGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationalGraph {
    /// Create a graph holding an empty model.
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let model = graph.add_node(RelNode::new(RelKind::Model, ""));
        Self { graph, model }
    }

    pub fn model(&self) -> NodeIndex {
        self.model
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a node of this graph.
    pub fn node(&self, n: NodeIndex) -> &RelNode {
        &self.graph[n]
    }

    pub fn get(&self, n: NodeIndex) -> Option<&RelNode> {
        self.graph.node_weight(n)
    }

    pub fn edge(&self, e: EdgeIndex) -> Option<&RelEdge> {
        self.graph.edge_weight(e)
    }

    fn check_node(&self, n: NodeIndex) -> RelationalResult<&RelNode> {
        self.graph
            .node_weight(n)
            .ok_or(RelationalError::NoSuchNode(n))
    }
}

// ============================================================================
// Construction
// ============================================================================

impl RelationalGraph {
    pub fn add_node(&mut self, kind: RelKind, id: impl Into<String>) -> NodeIndex {
        self.graph.add_node(RelNode::new(kind, id))
    }

    pub fn add_table(&mut self, id: impl Into<String>) -> NodeIndex {
        self.add_node(RelKind::Table, id)
    }

    pub fn add_column(
        &mut self,
        id: impl Into<String>,
        type_: impl Into<String>,
        null: bool,
        options: impl Into<String>,
    ) -> NodeIndex {
        self.add_node(
            RelKind::Column {
                type_: type_.into(),
                null,
                options: options.into(),
            },
            id,
        )
    }

    pub fn add_primary_key(&mut self, id: impl Into<String>) -> NodeIndex {
        self.add_node(RelKind::PrimaryKey, id)
    }

    pub fn add_foreign_key(
        &mut self,
        id: impl Into<String>,
        referenced_table: QName,
        referenced_columns: Vec<String>,
    ) -> NodeIndex {
        self.add_node(
            RelKind::ForeignKey {
                referenced_table,
                referenced_columns,
            },
            id,
        )
    }

    pub fn add_index(&mut self, id: impl Into<String>, unique: bool) -> NodeIndex {
        self.add_node(RelKind::Index { unique }, id)
    }

    /// Name `nameable` in `scope`.
    ///
    /// If the scope already has a node under `name`, returns
    /// [`DuplicateName`] and leaves the graph unchanged.
    pub fn add_names<N: NameRepr>(
        &mut self,
        scope: NodeIndex,
        nameable: NodeIndex,
        name: N,
    ) -> RelationalResult<EdgeIndex> {
        let scope_node = self.check_node(scope)?;
        let Some(index) = N::scope(scope_node) else {
            return Err(RelationalError::NotAScope {
                node: scope,
                repr: N::LABEL,
            });
        };

        if let Some(existing) = index.find(&name) {
            let orig = self
                .graph
                .edge_endpoints(existing)
                .map(|(_, n)| n)
                .unwrap_or(nameable);
            return Err(DuplicateName {
                scope,
                orig,
                dup: nameable,
                name: name.to_string(),
            }
            .into());
        }

        let target = self.check_node(nameable)?;
        if !N::names(target) {
            return Err(RelationalError::NotNameable {
                node: nameable,
                repr: N::LABEL,
            });
        }
        if target.named.is_some() {
            return Err(RelationalError::AlreadyNamed(nameable));
        }
        let key = target.kind().is_key();

        let edge = self
            .graph
            .add_edge(scope, nameable, name.clone().into_edge());
        if let Some(index) = N::scope_mut(&mut self.graph[scope]) {
            index.insert(name, edge, key);
        }
        self.graph[nameable].named = Some(edge);
        Ok(edge)
    }

    /// Add a table to the model.
    pub fn add_qnames(
        &mut self,
        table: NodeIndex,
        name: impl Into<QName>,
    ) -> RelationalResult<EdgeIndex> {
        let model = self.model;
        self.add_names(model, table, name.into())
    }

    /// Add a column or key to a table.
    pub fn add_unames(
        &mut self,
        table: NodeIndex,
        nameable: NodeIndex,
        name: impl Into<UName>,
    ) -> RelationalResult<EdgeIndex> {
        self.add_names(table, nameable, name.into())
    }

    /// Remove a naming edge, keeping the scope's indices in sync.
    ///
    /// Returns false if the edge does not exist or is not a naming edge.
    pub fn remove_names(&mut self, edge: EdgeIndex) -> bool {
        if !self.graph.edge_weight(edge).is_some_and(RelEdge::is_names) {
            return false;
        }
        let Some((scope, nameable)) = self.graph.edge_endpoints(edge) else {
            return false;
        };

        let scope_node = &mut self.graph[scope];
        if let Some(index) = scope_node.uscope.as_mut() {
            index.remove(edge);
        }
        if let Some(index) = scope_node.qscope.as_mut() {
            index.remove(edge);
        }
        if self.graph[nameable].named == Some(edge) {
            self.graph[nameable].named = None;
        }
        self.graph.remove_edge(edge);
        true
    }

    /// Append `column` to the columns contained in `key`.
    pub fn add_contains(
        &mut self,
        key: NodeIndex,
        column: NodeIndex,
    ) -> RelationalResult<EdgeIndex> {
        let is_key = self.check_node(key)?.kind().is_key();
        let is_column = self.check_node(column)?.kind().is_column();
        if !(is_key && is_column) {
            return Err(RelationalError::InvalidContains { key, column });
        }

        let edge = self.graph.add_edge(key, column, RelEdge::Contains);
        self.graph[key].contains.push(edge);
        Ok(edge)
    }
}

// ============================================================================
// Queries
// ============================================================================

impl RelationalGraph {
    /// Name of a nameable node, in display form.
    pub fn name(&self, n: NodeIndex) -> Option<String> {
        self.graph[n].named.and_then(|e| self.graph[e].name())
    }

    /// Qualified name of a table.
    pub fn qname(&self, table: NodeIndex) -> Option<&QName> {
        let e = self.graph[table].named?;
        QName::from_edge(&self.graph[e])
    }

    /// Unqualified name of a column or key.
    pub fn uname(&self, n: NodeIndex) -> Option<&UName> {
        let e = self.graph[n].named?;
        UName::from_edge(&self.graph[e])
    }

    /// Scope a nameable node is named in.
    pub fn scope_of(&self, n: NodeIndex) -> Option<NodeIndex> {
        let e = self.graph[n].named?;
        self.graph.edge_endpoints(e).map(|(s, _)| s)
    }

    /// Node named `name` in `scope`.
    pub fn find<N: NameRepr>(&self, scope: NodeIndex, name: &N) -> Option<NodeIndex> {
        let e = N::scope(&self.graph[scope])?.find(name)?;
        self.graph.edge_endpoints(e).map(|(_, n)| n)
    }

    pub fn find_table(&self, name: &QName) -> Option<NodeIndex> {
        self.find(self.model, name)
    }

    /// Node in `scope` identified by `{id, kind}`.
    pub fn find_by_id(&self, scope: NodeIndex, kind: &str, id: &str) -> Option<NodeIndex> {
        self.members(scope).into_iter().find(|n| {
            let node = &self.graph[*n];
            node.id() == id && node.kind().kind() == kind
        })
    }

    /// Named members of a scope, in scope order.
    pub fn members(&self, scope: NodeIndex) -> Vec<NodeIndex> {
        let node = &self.graph[scope];
        let edges: Vec<EdgeIndex> = match (&node.uscope, &node.qscope) {
            (Some(index), _) => index.iter().collect(),
            (_, Some(index)) => index.iter().collect(),
            _ => Vec::new(),
        };
        edges
            .into_iter()
            .filter_map(|e| self.graph.edge_endpoints(e).map(|(_, n)| n))
            .collect()
    }

    /// Tables in the model, in insertion order.
    pub fn tables(&self) -> Vec<NodeIndex> {
        self.members(self.model)
    }

    pub fn columns(&self, table: NodeIndex) -> Vec<NodeIndex> {
        self.members(table)
            .into_iter()
            .filter(|n| self.graph[*n].kind().is_column())
            .collect()
    }

    pub fn keys(&self, table: NodeIndex) -> Vec<NodeIndex> {
        self.members(table)
            .into_iter()
            .filter(|n| self.graph[*n].kind().is_key())
            .collect()
    }

    pub fn primary_key(&self, table: NodeIndex) -> Option<NodeIndex> {
        self.keys(table)
            .into_iter()
            .find(|n| matches!(self.graph[*n].kind(), RelKind::PrimaryKey))
    }

    /// Columns contained in a key, in key order.
    pub fn key_columns(&self, key: NodeIndex) -> Vec<NodeIndex> {
        self.graph[key]
            .contains()
            .iter()
            .filter_map(|e| self.graph.edge_endpoints(*e).map(|(_, c)| c))
            .collect()
    }

    /// Structural check of a scope's indices.
    pub fn scope_is_consistent(&self, scope: NodeIndex) -> bool {
        let node = &self.graph[scope];
        node.uscope.as_ref().map_or(true, |s| s.is_consistent())
            && node.qscope.as_ref().map_or(true, |s| s.is_consistent())
    }
}
