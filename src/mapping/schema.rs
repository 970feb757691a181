//! Relational schema construction.

use crate::graph::{EdgeIndex, Location, NodeIndex};
use crate::relational::{DuplicateName, QName, RelationalError, RelationalGraph, RelationalResult};
use crate::sql::dialect::SqlDialect;

use super::resolve::{ResolvedClass, ResolvedColumn, ResolvedContainer};
use super::{Context, MappingError, MappingResult};

/// A name collision found while building the schema, reported against the
/// source entity that produced the duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConflict {
    pub duplicate: DuplicateName,
    pub location: Location,
}

/// Result of [`Context::build_schema`]: the model, every name conflict and
/// every reportable mapping error found on the way. Entities whose names
/// collide are left out of their scope; a class whose members cannot be
/// mapped gets no table.
#[derive(Debug)]
pub struct SchemaBuild {
    pub model: RelationalGraph,
    pub conflicts: Vec<SchemaConflict>,
    pub errors: Vec<MappingError>,
}

impl SchemaBuild {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct SchemaBuilder<'c, 'g> {
    ctx: &'c Context<'g>,
    model: RelationalGraph,
    conflicts: Vec<SchemaConflict>,
}

impl SchemaBuilder<'_, '_> {
    /// Record a duplicate as a conflict; anything else is fatal.
    fn named(&mut self, r: RelationalResult<EdgeIndex>, source: NodeIndex) -> MappingResult<bool> {
        match r {
            Ok(edge) => {
                self.check_length(edge);
                Ok(true)
            }
            Err(RelationalError::DuplicateName(duplicate)) => {
                log::warn!(
                    name = duplicate.name.as_str();
                    "Duplicate name in relational schema"
                );
                self.conflicts.push(SchemaConflict {
                    duplicate,
                    location: self.ctx.location(source),
                });
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn check_length(&self, edge: EdgeIndex) {
        let Some(name) = self.model.edge(edge).and_then(|e| e.name()) else {
            return;
        };
        let max = self.ctx.dialect().max_identifier_length();
        let unqualified = name.rsplit('.').next().unwrap_or_default();
        if unqualified.len() > max {
            log::warn!(
                name = name.as_str(), max = max;
                "Name exceeds the database identifier limit"
            );
        }
    }

    fn table(&mut self, id: String, name: QName, source: NodeIndex) -> MappingResult<Option<NodeIndex>> {
        let table = self.model.add_table(id);
        let r = self.model.add_qnames(table, name.clone());
        if !self.named(r, source)? {
            return Ok(None);
        }
        log::debug!(table = name.to_string(); "Table created");
        Ok(Some(table))
    }

    /// Add the stored columns, returning each named column node alongside
    /// the column it came from.
    fn columns<'r>(
        &mut self,
        table: NodeIndex,
        columns: impl Iterator<Item = &'r ResolvedColumn>,
        id_of: impl Fn(&ResolvedColumn) -> String,
    ) -> MappingResult<Vec<(&'r ResolvedColumn, NodeIndex)>> {
        let mut added = Vec::new();
        for c in columns {
            let n = self
                .model
                .add_column(id_of(c), c.type_.clone(), c.null, c.options.clone());
            let r = self.model.add_unames(table, n, c.name.clone());
            if self.named(r, c.node)? {
                added.push((c, n));
            }
        }
        Ok(added)
    }

    /// A foreign key for every column that refers to an object.
    fn foreign_keys(
        &mut self,
        table: NodeIndex,
        table_name: &str,
        columns: &[(&ResolvedColumn, NodeIndex)],
    ) -> MappingResult<()> {
        for (c, n) in columns {
            let Some(target) = c.target else {
                continue;
            };
            let target_id = self.ctx.require_id_member(target)?;
            let fk = self.model.add_foreign_key(
                c.name.clone(),
                self.ctx.table_qname(target),
                vec![self.ctx.column_name(target_id)?],
            );
            let r = self
                .model
                .add_unames(table, fk, format!("{}_{}_fk", table_name, c.name));
            if self.named(r, c.node)? {
                self.model.add_contains(fk, *n)?;
            }
        }
        Ok(())
    }

    fn object(&mut self, class: NodeIndex, resolved: &ResolvedClass) -> MappingResult<()> {
        let qname = self.ctx.table_qname(class);
        let Some(table) = self.table(resolved.name.clone(), qname.clone(), class)? else {
            return Ok(());
        };
        let table_name = qname.uname().to_string();

        let columns = self.columns(table, resolved.stored_columns(), |c| c.member.clone())?;

        if let Some((id, n)) = columns.iter().find(|(c, _)| c.id) {
            let pk = self.model.add_primary_key(resolved.name.clone());
            let r = self
                .model
                .add_unames(table, pk, format!("{}_pk", table_name));
            if self.named(r, id.node)? {
                self.model.add_contains(pk, *n)?;
            }
        }

        self.foreign_keys(table, &table_name, &columns)?;

        for container in &resolved.containers {
            self.container(&resolved.name, container)?;
        }
        Ok(())
    }

    fn container(&mut self, owner: &str, container: &ResolvedContainer) -> MappingResult<()> {
        let Some(qname) = container.table.clone() else {
            return Ok(());
        };
        let id = format!("{}.{}", owner, container.member);
        let Some(table) = self.table(id, qname.clone(), container.node)? else {
            return Ok(());
        };
        let table_name = qname.uname().to_string();

        let columns = self.columns(table, container.columns.iter(), |c| c.name.clone())?;

        if let Some((id, n)) = columns.iter().find(|(c, _)| c.id) {
            let index = self.model.add_index(id.name.clone(), false);
            let r = self
                .model
                .add_unames(table, index, format!("{}_{}_i", table_name, id.name));
            if self.named(r, container.node)? {
                self.model.add_contains(index, *n)?;
            }
        }

        self.foreign_keys(table, &table_name, &columns)
    }
}

impl Context<'_> {
    /// Build the relational model: one table per object class, one per
    /// non-inverse container member.
    ///
    /// Unmapped and unsupported member types are collected in
    /// [`SchemaBuild::errors`] and the class is skipped; only fatal errors
    /// abort the build.
    pub fn build_schema(&self) -> MappingResult<SchemaBuild> {
        let mut builder = SchemaBuilder {
            ctx: self,
            model: RelationalGraph::new(),
            conflicts: Vec::new(),
        };

        let objects: Vec<NodeIndex> = self
            .graph
            .classes()
            .into_iter()
            .filter(|c| self.is_object(*c))
            .collect();
        log::debug!(objects = objects.len(); "Building relational schema");

        let mut errors = Vec::new();
        for class in objects {
            let resolved = match self.resolve_class(class) {
                Ok(resolved) => resolved,
                Err(e) if !e.is_fatal() => {
                    log::warn!(
                        class = self.graph.fq_name(class), error = e.to_string();
                        "Class skipped"
                    );
                    errors.push(e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            builder.object(class, &resolved)?;
        }

        log::debug!(
            tables = builder.model.tables().len(),
            conflicts = builder.conflicts.len(),
            errors = errors.len();
            "Relational schema built"
        );

        Ok(SchemaBuild {
            model: builder.model,
            conflicts: builder.conflicts,
            errors,
        })
    }
}
