//! Member traversal.
//!
//! [`walk_class`] visits a class's persistent structure in declaration
//! order: object and composite bases first, then data members. Each
//! member is dispatched to one hook by what its type maps to:
//!
//! - composite value (possibly wrapped) → [`MemberVisitor::composite`],
//!   which by default recurses into the composite class
//! - container (possibly wrapped) → [`MemberVisitor::container`]
//! - anything else → [`MemberVisitor::simple`]
//!
//! Transient members are skipped. A visitor stops the walk early by
//! returning `true` from [`MemberVisitor::done`].

use crate::graph::NodeIndex;

use super::{Context, MappingResult};

pub trait MemberVisitor {
    /// Visit a whole class. Override to memoize per class.
    fn class(&mut self, ctx: &Context<'_>, class: NodeIndex) -> MappingResult<()>
    where
        Self: Sized,
    {
        walk_class(ctx, class, self)
    }

    fn simple(&mut self, ctx: &Context<'_>, member: NodeIndex) -> MappingResult<()>;

    /// `container` is the (unwrapped) container type of `member`.
    fn container(
        &mut self,
        _ctx: &Context<'_>,
        _member: NodeIndex,
        _container: NodeIndex,
    ) -> MappingResult<()> {
        Ok(())
    }

    /// `member` is `None` when `class` is reached as a base.
    fn composite(
        &mut self,
        ctx: &Context<'_>,
        _member: Option<NodeIndex>,
        class: NodeIndex,
    ) -> MappingResult<()>
    where
        Self: Sized,
    {
        self.class(ctx, class)
    }

    fn done(&self) -> bool {
        false
    }
}

/// Walk `class`'s bases and members, dispatching to `visitor`.
pub fn walk_class<V: MemberVisitor>(
    ctx: &Context<'_>,
    class: NodeIndex,
    visitor: &mut V,
) -> MappingResult<()> {
    let graph = ctx.graph();

    for base in graph.bases(class) {
        if visitor.done() {
            return Ok(());
        }
        if ctx.is_object(base) || ctx.composite(base) {
            visitor.composite(ctx, None, base)?;
        }
    }

    for m in graph.data_members(class) {
        if visitor.done() {
            return Ok(());
        }
        if ctx.transient(m) {
            continue;
        }

        let t = ctx.member_type(m, "")?;
        if let Some(comp) = ctx.composite_wrapper(t) {
            visitor.composite(ctx, Some(m), comp)?;
        } else if let Some(cont) = ctx.container_wrapper(t) {
            visitor.container(ctx, m, cont)?;
        } else {
            visitor.simple(ctx, m)?;
        }
    }

    Ok(())
}
