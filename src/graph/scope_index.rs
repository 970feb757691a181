//! Ordered name index for scopes.
//!
//! A scope owns an ordered list of naming edges. The same name can be
//! declared more than once (overloads, redeclarations), so lookup by name
//! returns a slice rather than a single edge. Two auxiliary maps are kept
//! in sync with the list:
//!
//! - name → edges declared under that name, in insertion order
//! - edge → position in the ordered list

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::EdgeIndex;

/// Ordered, multi-valued name → edge index.
#[derive(Debug, Clone)]
pub struct ScopeIndex<N> {
    /// Naming edges in scope order.
    order: Vec<(N, EdgeIndex)>,

    /// Index: name → edges, in insertion order.
    by_name: HashMap<N, Vec<EdgeIndex>>,

    /// Index: edge → position in `order`.
    positions: HashMap<EdgeIndex, usize>,
}

impl<N> Default for ScopeIndex<N> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            by_name: HashMap::new(),
            positions: HashMap::new(),
        }
    }
}

impl<N> ScopeIndex<N>
where
    N: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append an edge at the end of the scope.
    ///
    /// Returns false if the edge is already present.
    pub fn push(&mut self, name: N, edge: EdgeIndex) -> bool {
        let at = self.order.len();
        self.insert_at(at, name, edge)
    }

    /// Insert an edge at `position` (clamped to the current length).
    ///
    /// Returns false if the edge is already present.
    pub fn insert_at(&mut self, position: usize, name: N, edge: EdgeIndex) -> bool {
        if self.positions.contains_key(&edge) {
            return false;
        }

        let position = position.min(self.order.len());
        self.order.insert(position, (name.clone(), edge));
        self.by_name.entry(name).or_default().push(edge);
        self.reindex_from(position);
        true
    }

    /// Remove an edge from the scope. Returns the name it was declared under.
    pub fn remove(&mut self, edge: EdgeIndex) -> Option<N> {
        let position = self.positions.remove(&edge)?;
        let (name, _) = self.order.remove(position);

        if let Some(edges) = self.by_name.get_mut(&name) {
            edges.retain(|e| *e != edge);
            if edges.is_empty() {
                self.by_name.remove(&name);
            }
        }

        self.reindex_from(position);
        Some(name)
    }

    /// All edges declared under `name`, in insertion order.
    pub fn find<Q>(&self, name: &Q) -> &[EdgeIndex]
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First edge declared under `name`.
    pub fn first<Q>(&self, name: &Q) -> Option<EdgeIndex>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(name).first().copied()
    }

    pub fn contains_name<Q>(&self, name: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_name.contains_key(name)
    }

    /// Position of an edge in scope order.
    pub fn position(&self, edge: EdgeIndex) -> Option<usize> {
        self.positions.get(&edge).copied()
    }

    /// Name an edge was declared under.
    pub fn name_of(&self, edge: EdgeIndex) -> Option<&N> {
        self.position(edge).map(|p| &self.order[p].0)
    }

    /// Edges in scope order.
    pub fn iter(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.order.iter().map(|(_, e)| *e)
    }

    /// `(name, edge)` pairs in scope order.
    pub fn entries(&self) -> impl Iterator<Item = (&N, EdgeIndex)> + '_ {
        self.order.iter().map(|(n, e)| (n, *e))
    }

    /// Check that the name index, the position index and the ordered list
    /// all enumerate the same edge set.
    pub fn is_consistent(&self) -> bool {
        let listed: HashSet<EdgeIndex> = self.iter().collect();
        if listed.len() != self.order.len() {
            return false;
        }

        let named: Vec<EdgeIndex> = self.by_name.values().flatten().copied().collect();
        if named.len() != listed.len() || !named.iter().all(|e| listed.contains(e)) {
            return false;
        }

        self.positions.len() == listed.len()
            && self
                .order
                .iter()
                .enumerate()
                .all(|(i, (name, e))| {
                    self.positions.get(e) == Some(&i)
                        && self.by_name.get(name).is_some_and(|v| v.contains(e))
                })
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, (_, e)) in self.order.iter().enumerate().skip(start) {
            self.positions.insert(*e, i);
        }
    }
}
