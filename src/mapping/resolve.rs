//! Flattened per-class mapping.
//!
//! [`Context::resolve_class`] gathers everything emitters need about one
//! class into a serialisable record: its table, counts, identity and one
//! entry per column with composite members expanded in place.

use serde::Serialize;

use crate::graph::NodeIndex;
use crate::relational::QName;
use crate::semantic::keys;
use crate::sql::SqlDialect;

use super::classify::{ClassKind, ContainerKind};
use super::naming::TablePrefix;
use super::traversal::{walk_class, MemberVisitor};
use super::{Context, MappingResult};

/// One column of a class or container table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedColumn {
    /// Dotted member path from the resolved class (`address.street`).
    pub member: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub null: bool,
    pub options: String,
    pub id: bool,
    /// Inverse side of a relationship; no column is stored for it.
    pub inverse: bool,
    /// Class an object-pointer column refers to.
    pub points_to: Option<String>,
    #[serde(skip)]
    pub node: NodeIndex,
    #[serde(skip)]
    pub target: Option<NodeIndex>,
}

/// A container member and the table that stores its elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedContainer {
    pub member: String,
    pub kind: ContainerKind,
    pub inverse: bool,
    /// `None` for inverse containers, which are stored by the other side.
    pub table: Option<QName>,
    pub columns: Vec<ResolvedColumn>,
    #[serde(skip)]
    pub node: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedClass {
    pub name: String,
    pub kind: ClassKind,
    pub table: Option<QName>,
    pub in_column_count: usize,
    pub out_column_count: usize,
    pub id_member: Option<String>,
    pub columns: Vec<ResolvedColumn>,
    pub containers: Vec<ResolvedContainer>,
}

impl ResolvedClass {
    /// Columns stored in the class's own table.
    pub fn stored_columns(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.columns.iter().filter(|c| !c.inverse)
    }

    pub fn id_column(&self) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.id)
    }

    /// JSON form handed to emitters.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Collects columns, expanding composites under a column-name prefix.
struct ColumnCollector {
    /// Object class owning container tables; `None` when containers are
    /// not resolved (composite values on their own, container elements).
    owner: Option<NodeIndex>,
    column_prefix: String,
    path: Vec<String>,
    table_prefix: TablePrefix,
    columns: Vec<ResolvedColumn>,
    containers: Vec<ResolvedContainer>,
}

impl ColumnCollector {
    fn new(owner: Option<NodeIndex>, column_prefix: String, table_prefix: TablePrefix) -> Self {
        Self {
            owner,
            column_prefix,
            path: Vec::new(),
            table_prefix,
            columns: Vec::new(),
            containers: Vec::new(),
        }
    }

    fn member_path(&self, ctx: &Context<'_>, m: NodeIndex) -> String {
        let mut path = self.path.clone();
        path.push(ctx.graph().name(m));
        path.join(".")
    }

    fn container_table(
        &self,
        ctx: &Context<'_>,
        owner: NodeIndex,
        m: NodeIndex,
        c: NodeIndex,
    ) -> MappingResult<ResolvedContainer> {
        let kind = ctx.container_kind(c)?;
        let inverse = ctx.inverse(m, keys::VALUE)?;
        let member = self.member_path(ctx, m);

        if inverse {
            return Ok(ResolvedContainer {
                member,
                kind,
                inverse,
                table: None,
                columns: Vec::new(),
                node: m,
            });
        }

        let table = ctx.table_qname_for_member(m, &self.table_prefix)?;
        let owner_id = ctx.require_id_member(owner)?;
        let mut columns = vec![ResolvedColumn {
            member: member.clone(),
            name: ctx.column_name_keyed(m, keys::ID, "object_id")?,
            type_: ctx.column_type(owner_id, "")?,
            null: false,
            options: ctx.container_id_options(m)?,
            id: true,
            inverse: false,
            points_to: Some(ctx.graph().fq_name(owner)),
            node: m,
            target: Some(owner),
        }];

        if ctx.ordered(m, c)? {
            columns.push(element_column(ctx, m, &member, "index", "index", false)?);
        }
        if kind.is_map() {
            columns.push(element_column(ctx, m, &member, "key", "key", true)?);
        }

        let vt = ctx.member_type(m, keys::VALUE)?;
        let value_name = ctx.column_name_keyed(m, keys::VALUE, "value")?;
        match ctx.composite_wrapper(vt) {
            Some(comp) => {
                let mut sub = ColumnCollector::new(
                    None,
                    format!("{}_", value_name),
                    self.table_prefix.clone(),
                );
                sub.path.push(member.clone());
                sub.class(ctx, comp)?;
                columns.extend(sub.columns);
            }
            None => columns.push(element_column(ctx, m, &member, keys::VALUE, &value_name, true)?),
        }

        Ok(ResolvedContainer {
            member,
            kind,
            inverse,
            table: Some(table),
            columns,
            node: m,
        })
    }
}

/// Column for the `kp` sub-value of container member `m`.
fn element_column(
    ctx: &Context<'_>,
    m: NodeIndex,
    member: &str,
    kp: &str,
    default_name: &str,
    nullable: bool,
) -> MappingResult<ResolvedColumn> {
    let t = ctx.member_type(m, kp)?;
    let target = ctx.object_pointer(t);
    Ok(ResolvedColumn {
        member: member.to_string(),
        name: ctx.column_name_keyed(m, kp, default_name)?,
        type_: ctx.column_type(m, kp)?,
        null: nullable && ctx.null(m, kp)?,
        options: ctx.column_options(m, kp)?,
        id: false,
        inverse: false,
        points_to: target.map(|c| ctx.graph().fq_name(c)),
        node: m,
        target,
    })
}

impl MemberVisitor for ColumnCollector {
    fn simple(&mut self, ctx: &Context<'_>, m: NodeIndex) -> MappingResult<()> {
        let t = ctx.member_type(m, "")?;
        let target = ctx.object_pointer(t);
        let id = ctx.is_id(m);

        let mut options = ctx.column_options(m, "")?;
        if id && ctx.annotations(m).has(keys::AUTO) {
            if let Some(clause) = ctx.dialect().identity_clause() {
                if !options.is_empty() {
                    options.push(' ');
                }
                options.push_str(clause);
            }
        }

        self.columns.push(ResolvedColumn {
            member: self.member_path(ctx, m),
            name: format!("{}{}", self.column_prefix, ctx.column_name(m)?),
            type_: ctx.column_type(m, "")?,
            null: ctx.null(m, "")?,
            options,
            id,
            inverse: ctx.inverse(m, "")?,
            points_to: target.map(|c| ctx.graph().fq_name(c)),
            node: m,
            target,
        });
        Ok(())
    }

    fn container(&mut self, ctx: &Context<'_>, m: NodeIndex, c: NodeIndex) -> MappingResult<()> {
        if let Some(owner) = self.owner {
            let container = self.container_table(ctx, owner, m, c)?;
            self.containers.push(container);
        }
        Ok(())
    }

    fn composite(
        &mut self,
        ctx: &Context<'_>,
        member: Option<NodeIndex>,
        class: NodeIndex,
    ) -> MappingResult<()> {
        let Some(m) = member else {
            return walk_class(ctx, class, self);
        };

        let saved_prefix = self.column_prefix.clone();
        let saved_table_prefix = self.table_prefix.clone();
        self.column_prefix = format!("{}{}_", self.column_prefix, ctx.column_name(m)?);
        self.table_prefix = self.table_prefix.nested(ctx, m);
        self.path.push(ctx.graph().name(m));

        let r = walk_class(ctx, class, self);

        self.path.pop();
        self.column_prefix = saved_prefix;
        self.table_prefix = saved_table_prefix;
        r
    }
}

impl Context<'_> {
    /// Resolve the full mapping of class `c`.
    pub fn resolve_class(&self, c: NodeIndex) -> MappingResult<ResolvedClass> {
        let kind = self.class_kind(c);
        let object = kind == ClassKind::Object;

        let mut collector = ColumnCollector::new(
            object.then_some(c),
            String::new(),
            TablePrefix::for_object(self, c),
        );
        collector.class(self, c)?;

        Ok(ResolvedClass {
            name: self.graph.fq_name(c),
            kind,
            table: object.then(|| self.table_qname(c)),
            in_column_count: self.in_column_count(c)?,
            out_column_count: self.out_column_count(c)?,
            id_member: self.id_member(c)?.map(|m| self.graph.name(m)),
            columns: collector.columns,
            containers: collector.containers,
        })
    }
}
