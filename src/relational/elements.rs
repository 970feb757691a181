//! Node and edge types of the relational graph.

use std::hash::Hash;

use crate::graph::{EdgeIndex, ScopeIndex};

use super::name::{QName, UName};

// ============================================================================
// Node Kinds
// ============================================================================

/// Kind of a relational node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelKind {
    /// Root of a schema; a qualified scope of tables.
    Model,
    /// Qualified nameable and unqualified scope of columns and keys.
    Table,
    Column {
        type_: String,
        null: bool,
        options: String,
    },
    PrimaryKey,
    ForeignKey {
        referenced_table: QName,
        referenced_columns: Vec<String>,
    },
    Index {
        unique: bool,
    },
}

impl RelKind {
    /// Kind string, used together with the correlation id to identify a
    /// node within its scope.
    pub fn kind(&self) -> &'static str {
        match self {
            RelKind::Model => "model",
            RelKind::Table => "table",
            RelKind::Column { .. } => "column",
            RelKind::PrimaryKey => "primary key",
            RelKind::ForeignKey { .. } => "foreign key",
            RelKind::Index { .. } => "index",
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, RelKind::Model)
    }

    pub fn is_table(&self) -> bool {
        matches!(self, RelKind::Table)
    }

    pub fn is_column(&self) -> bool {
        matches!(self, RelKind::Column { .. })
    }

    /// Keys (and indexes) contain columns and are kept after all columns
    /// in a table scope.
    pub fn is_key(&self) -> bool {
        matches!(
            self,
            RelKind::PrimaryKey | RelKind::ForeignKey { .. } | RelKind::Index { .. }
        )
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// Scope of uniquely named relational nodes.
///
/// Keys are kept after every non-key: a non-key inserted into a scope that
/// already holds keys lands just before the first key.
#[derive(Debug, Clone)]
pub struct RelScope<N> {
    index: ScopeIndex<N>,
    keys: usize,
}

impl<N> Default for RelScope<N> {
    fn default() -> Self {
        Self {
            index: ScopeIndex::default(),
            keys: 0,
        }
    }
}

impl<N> RelScope<N>
where
    N: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Edge naming `name`, if any.
    pub fn find(&self, name: &N) -> Option<EdgeIndex> {
        self.index.first(name)
    }

    /// Edges in scope order.
    pub fn iter(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.index.iter()
    }

    pub fn position(&self, edge: EdgeIndex) -> Option<usize> {
        self.index.position(edge)
    }

    /// Position of the first key, or the length if the scope has none.
    pub fn first_key(&self) -> usize {
        self.index.len() - self.keys
    }

    pub fn is_consistent(&self) -> bool {
        self.index.is_consistent() && self.keys <= self.index.len()
    }

    pub(crate) fn insert(&mut self, name: N, edge: EdgeIndex, key: bool) -> bool {
        let inserted = if key {
            self.index.push(name, edge)
        } else {
            let at = self.first_key();
            self.index.insert_at(at, name, edge)
        };
        if inserted && key {
            self.keys += 1;
        }
        inserted
    }

    pub(crate) fn remove(&mut self, edge: EdgeIndex) -> Option<N> {
        let position = self.index.position(edge)?;
        let key = position >= self.first_key();
        let name = self.index.remove(edge)?;
        if key {
            self.keys -= 1;
        }
        Some(name)
    }
}

// ============================================================================
// Nodes and Edges
// ============================================================================

/// A relational graph node.
#[derive(Debug, Clone)]
pub struct RelNode {
    kind: RelKind,
    id: String,
    pub(crate) named: Option<EdgeIndex>,
    pub(crate) uscope: Option<RelScope<UName>>,
    pub(crate) qscope: Option<RelScope<QName>>,
    pub(crate) contains: Vec<EdgeIndex>,
}

impl RelNode {
    pub(crate) fn new(kind: RelKind, id: impl Into<String>) -> Self {
        Self {
            uscope: kind.is_table().then(RelScope::new),
            qscope: kind.is_model().then(RelScope::new),
            kind,
            id: id.into(),
            named: None,
            contains: Vec::new(),
        }
    }

    pub fn kind(&self) -> &RelKind {
        &self.kind
    }

    /// Correlation id of the semantic entity this node was derived from.
    ///
    /// Not unique on its own; `{id, kind}` is unique within a scope.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The single naming edge of a nameable node.
    pub fn named(&self) -> Option<EdgeIndex> {
        self.named
    }

    pub fn is_scope(&self) -> bool {
        self.uscope.is_some() || self.qscope.is_some()
    }

    /// Contains edges of a key, in column order.
    pub fn contains(&self) -> &[EdgeIndex] {
        &self.contains
    }
}

/// A relational graph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelEdge {
    /// Table scope → column or key.
    UNames(UName),
    /// Model → table.
    QNames(QName),
    /// Key → column.
    Contains,
}

impl RelEdge {
    pub fn is_names(&self) -> bool {
        !matches!(self, RelEdge::Contains)
    }

    /// Display form of the name carried by a naming edge.
    pub fn name(&self) -> Option<String> {
        match self {
            RelEdge::UNames(n) => Some(n.to_string()),
            RelEdge::QNames(n) => Some(n.to_string()),
            RelEdge::Contains => None,
        }
    }
}
