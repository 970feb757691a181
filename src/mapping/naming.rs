//! Table and column names.

use crate::graph::NodeIndex;
use crate::ident;
use crate::relational::QName;
use crate::semantic::{keyed, keys};

use super::{Context, MappingError, MappingResult};

/// Name prefix for tables derived from members (container tables).
///
/// `level` is 1 for members of an object class and grows by one for each
/// composite member the container is nested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePrefix {
    pub prefix: String,
    pub level: usize,
}

impl TablePrefix {
    pub fn new(prefix: impl Into<String>, level: usize) -> Self {
        Self {
            prefix: prefix.into(),
            level,
        }
    }

    /// Prefix for container tables of object class `c`: `<table>_`.
    pub fn for_object(ctx: &Context<'_>, c: NodeIndex) -> Self {
        Self::new(format!("{}_", ctx.table_name(c)), 1)
    }

    /// Prefix one composite member deeper.
    pub fn nested(&self, ctx: &Context<'_>, m: NodeIndex) -> Self {
        Self::new(
            format!("{}{}_", self.prefix, ctx.public_name_db(m)),
            self.level + 1,
        )
    }
}

impl Context<'_> {
    /// Member name with naming conventions stripped (`m_name` → `name`).
    pub fn public_name_db(&self, m: NodeIndex) -> String {
        ident::public_name_db(&self.graph.name(m))
    }

    /// Member name as a legal output-language identifier.
    pub fn public_name(&self, m: NodeIndex) -> String {
        ident::public_name(&self.graph.name(m), &self.keywords)
    }

    /// Table name of a class: the global prefix plus the `table`
    /// annotation or the class name.
    pub fn table_name(&self, c: NodeIndex) -> String {
        let name = match self.annotations(c).get_str(keys::TABLE) {
            Some(t) => t.to_string(),
            None => self.graph.name(c),
        };
        format!("{}{}", self.settings.table_prefix, name)
    }

    /// Table name of a class, qualified with the configured schema.
    pub fn table_qname(&self, c: NodeIndex) -> QName {
        QName::qualified(self.schema(), self.table_name(c))
    }

    /// Table name for a member-owned table.
    ///
    /// An explicit `table` annotation is taken relative to the global
    /// prefix at the top level and relative to `prefix` when nested.
    /// Otherwise the member's public name is appended to `prefix`.
    pub fn table_name_for_member(
        &self,
        m: NodeIndex,
        prefix: &TablePrefix,
    ) -> MappingResult<String> {
        let global = &self.settings.table_prefix;
        if !prefix.prefix.starts_with(global.as_str()) {
            return Err(MappingError::internal(
                m,
                format!(
                    "table prefix '{}' does not start with '{}'",
                    prefix.prefix, global
                ),
            ));
        }

        match self.annotations(m).get_str(keys::TABLE) {
            Some(t) if prefix.level == 1 => Ok(format!("{}{}", global, t)),
            Some(t) => Ok(format!("{}{}", prefix.prefix, t)),
            None => Ok(format!("{}{}", prefix.prefix, self.public_name_db(m))),
        }
    }

    pub fn table_qname_for_member(
        &self,
        m: NodeIndex,
        prefix: &TablePrefix,
    ) -> MappingResult<QName> {
        Ok(QName::qualified(
            self.schema(),
            self.table_name_for_member(m, prefix)?,
        ))
    }

    /// Column name of `m`: its `column` annotation, else its type's,
    /// else its public name.
    pub fn column_name(&self, m: NodeIndex) -> MappingResult<String> {
        if let Some(c) = self.annotations(m).get_str(keys::COLUMN) {
            return Ok(c.to_string());
        }
        let t = self.unqualified(self.member_type(m, "")?);
        if let Some(c) = self.annotations(t).get_str(keys::COLUMN) {
            return Ok(c.to_string());
        }
        Ok(self.public_name_db(m))
    }

    /// Column name of the `kp` sub-value of container member `m`.
    pub fn column_name_keyed(&self, m: NodeIndex, kp: &str, default: &str) -> MappingResult<String> {
        let key = keyed(kp, keys::COLUMN);
        if let Some(c) = self.annotations(m).get_str(&key) {
            return Ok(c.to_string());
        }
        let t = self.unqualified(self.member_type(m, "")?);
        if let Some(c) = self.annotations(t).get_str(&key) {
            return Ok(c.to_string());
        }
        Ok(default.to_string())
    }
}
