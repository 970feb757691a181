//! Per-node memo of derived facts.
//!
//! The mapping engine derives facts from the semantic graph (is this class
//! a composite value, how many columns does it map to, which member is the
//! identity). Each fact is computed at most once per node: the first
//! computation is stored and every later query returns the stored value,
//! even if the node's annotations change afterwards.

use once_cell::unsync::OnceCell;

use super::NodeIndex;

/// Closed set of facts the mapping engine caches on semantic nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fact {
    /// The class is a value type embedded as a column group.
    CompositeValue,
    /// Number of columns read from the database.
    InColumnCount,
    /// Number of columns written to the database.
    OutColumnCount,
    /// The class's identity member, if any.
    IdMember,
}

/// Which side of a column count is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDirection {
    /// Columns materialized on this side (inverse members excluded).
    In,
    /// All columns, inverse members included.
    Out,
}

impl ColumnDirection {
    pub fn fact(self) -> Fact {
        match self {
            ColumnDirection::In => Fact::InColumnCount,
            ColumnDirection::Out => Fact::OutColumnCount,
        }
    }
}

/// Write-once cache of derived facts for one node.
///
/// Not `Sync`: the graph is populated and queried by a single pass.
#[derive(Debug, Default)]
pub struct FactCache {
    composite_value: OnceCell<bool>,
    in_column_count: OnceCell<usize>,
    out_column_count: OnceCell<usize>,
    id_member: OnceCell<Option<NodeIndex>>,
}

impl FactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fact` has already been computed for this node.
    pub fn is_cached(&self, fact: Fact) -> bool {
        match fact {
            Fact::CompositeValue => self.composite_value.get().is_some(),
            Fact::InColumnCount => self.in_column_count.get().is_some(),
            Fact::OutColumnCount => self.out_column_count.get().is_some(),
            Fact::IdMember => self.id_member.get().is_some(),
        }
    }

    pub fn composite_value(&self, compute: impl FnOnce() -> bool) -> bool {
        *self.composite_value.get_or_init(compute)
    }

    pub fn column_count<E>(
        &self,
        direction: ColumnDirection,
        compute: impl FnOnce() -> Result<usize, E>,
    ) -> Result<usize, E> {
        let cell = match direction {
            ColumnDirection::In => &self.in_column_count,
            ColumnDirection::Out => &self.out_column_count,
        };
        cell.get_or_try_init(compute).copied()
    }

    pub fn id_member<E>(
        &self,
        compute: impl FnOnce() -> Result<Option<NodeIndex>, E>,
    ) -> Result<Option<NodeIndex>, E> {
        self.id_member.get_or_try_init(compute).copied()
    }
}
