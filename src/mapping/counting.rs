//! Column counts and identity members.

use crate::graph::{ColumnDirection, NodeIndex};

use super::traversal::{walk_class, MemberVisitor};
use super::{Context, MappingError, MappingResult};

/// Counts the columns a class maps to. Per-class totals are memoized on
/// the class node, so a composite used in many places is walked once.
struct ColumnCounter {
    direction: ColumnDirection,
    count: usize,
}

impl ColumnCounter {
    fn new(direction: ColumnDirection) -> Self {
        Self {
            direction,
            count: 0,
        }
    }
}

impl MemberVisitor for ColumnCounter {
    fn class(&mut self, ctx: &Context<'_>, class: NodeIndex) -> MappingResult<()> {
        let direction = self.direction;
        let n = ctx
            .graph()
            .node(class)
            .facts()
            .column_count(direction, || {
                let mut sub = ColumnCounter::new(direction);
                walk_class(ctx, class, &mut sub)?;
                Ok::<_, MappingError>(sub.count)
            })?;
        self.count += n;
        Ok(())
    }

    fn simple(&mut self, ctx: &Context<'_>, member: NodeIndex) -> MappingResult<()> {
        if self.direction == ColumnDirection::Out || !ctx.inverse(member, "")? {
            self.count += 1;
        }
        Ok(())
    }
}

impl Context<'_> {
    fn column_count(&self, c: NodeIndex, direction: ColumnDirection) -> MappingResult<usize> {
        let mut counter = ColumnCounter::new(direction);
        counter.class(self, c)?;
        Ok(counter.count)
    }

    /// Columns loaded from the database for `c`. Inverse members have no
    /// column of their own and are not counted.
    pub fn in_column_count(&self, c: NodeIndex) -> MappingResult<usize> {
        self.column_count(c, ColumnDirection::In)
    }

    /// Columns written for `c`, inverse members included.
    pub fn out_column_count(&self, c: NodeIndex) -> MappingResult<usize> {
        self.column_count(c, ColumnDirection::Out)
    }

    /// The first direct data member annotated `id`.
    pub fn id_member(&self, c: NodeIndex) -> MappingResult<Option<NodeIndex>> {
        self.graph.node(c).facts().id_member(|| {
            Ok::<_, MappingError>(
                self.graph
                    .data_members(c)
                    .into_iter()
                    .find(|m| self.is_id(*m)),
            )
        })
    }

    /// Like [`id_member`](Self::id_member), but a missing identity is an
    /// error.
    pub fn require_id_member(&self, c: NodeIndex) -> MappingResult<NodeIndex> {
        self.id_member(c)?
            .ok_or_else(|| MappingError::MissingIdMember {
                class_name: self.graph.fq_name(c),
                location: self.location(c),
            })
    }
}
