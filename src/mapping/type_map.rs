//! Object-language type → database type lookups.

use std::collections::{BTreeMap, HashMap};

use crate::config::TypeMapSettings;
use crate::graph::{EdgeIndex, NodeIndex};
use crate::semantic::{keys, keyed, NodeKind};
use crate::sql::{Dialect, SqlDialect};

use super::{Context, MappingError, MappingResult};

/// Database types for one object-language type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub type_: String,
    pub id_type: Option<String>,
}

impl MappedType {
    /// Column type, or the identity type when `id` is set and one exists.
    pub fn select(&self, id: bool) -> &str {
        match (&self.id_type, id) {
            (Some(id_type), true) => id_type,
            _ => &self.type_,
        }
    }
}

/// Fully-qualified type name → database type.
///
/// Populated once from the dialect's defaults, then overlaid with the
/// settings' per-type entries.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    entries: HashMap<String, MappedType>,
}

impl TypeMap {
    pub fn new(dialect: Dialect, overrides: &BTreeMap<String, TypeMapSettings>) -> Self {
        let mut entries: HashMap<String, MappedType> = dialect
            .type_map()
            .iter()
            .map(|m| {
                (
                    m.name.to_string(),
                    MappedType {
                        type_: m.type_.to_string(),
                        id_type: m.id_type.map(str::to_string),
                    },
                )
            })
            .collect();

        for (name, o) in overrides {
            entries.insert(
                name.clone(),
                MappedType {
                    type_: o.type_.clone(),
                    id_type: o.id_type.clone(),
                },
            );
        }

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&MappedType> {
        self.entries.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, mapped: MappedType) {
        self.entries.insert(name.into(), mapped);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Context<'_> {
    /// Database type for `t`, or an empty string when nothing maps.
    ///
    /// Each alias in the hint chain is tried first, so a `size_t` member
    /// picks up a mapping for `::size_t` before falling back to the
    /// underlying fundamental type.
    pub fn database_type(&self, t: NodeIndex, hint: Option<EdgeIndex>, id: bool) -> String {
        let mut hint = hint;
        while let Some(h) = hint {
            let name = self.graph.fq_name_hint(t, Some(h));
            log::trace!(name = name.as_str(); "Trying type map alias");
            if let Some(mapped) = self.type_map.get(&name) {
                return mapped.select(id).to_string();
            }
            hint = self.graph.next_hint(h);
        }

        let name = self.graph.fq_name(t);
        log::trace!(name = name.as_str(); "Trying type map entry");
        self.type_map
            .get(&name)
            .map(|mapped| mapped.select(id).to_string())
            .unwrap_or_default()
    }

    /// Column type of `m` (or of its `kp` sub-value).
    ///
    /// Explicit `type`/`id-type`/`<kp>-type` annotations win. Object
    /// pointers take the identity type of the class they point to.
    /// Everything else goes through the type map.
    pub fn column_type(&self, m: NodeIndex, kp: &str) -> MappingResult<String> {
        let ma = self.annotations(m);
        let id = kp.is_empty() && ma.has(keys::ID);

        if kp.is_empty() {
            if let Some(t) = ma.get_str(keys::TYPE) {
                return Ok(t.to_string());
            }
        } else {
            if let Some(t) = ma.get_str(&keyed(kp, keys::TYPE)) {
                return Ok(t.to_string());
            }
            let c = self.member_type(m, "")?;
            if let Some(t) = self.annotations(c).get_str(&keyed(kp, keys::TYPE)) {
                return Ok(t.to_string());
            }
        }

        let t = self.member_type(m, kp)?;
        let ta = self.annotations(self.unqualified(t));
        if id {
            if let Some(s) = ta.get_str(keys::ID_TYPE) {
                return Ok(s.to_string());
            }
        }
        if let Some(s) = ta.get_str(keys::TYPE) {
            return Ok(s.to_string());
        }

        if let Some(class) = self.object_pointer(t) {
            let pointed_id = self.require_id_member(class)?;
            return self.column_type(pointed_id, "");
        }

        if let NodeKind::Unsupported { type_name } = self.graph.node(self.unqualified(t)).kind() {
            return Err(MappingError::UnsupportedType {
                type_name: type_name.clone(),
                location: self.location(m),
            });
        }

        // Hints name the declared type, so they only apply when the member
        // was declared through an alias of an unqualified type.
        let hint = match kp.is_empty() && !self.is_qualifier(t) {
            true => self.graph.belongs_hint(m),
            false => None,
        };
        let base = self.unqualified(t);
        let mut r = self.database_type(base, hint, id);
        if r.is_empty() {
            if let Some(wt) = self.wrapper(base) {
                r = self.database_type(self.unqualified(wt), None, id);
            }
        }
        if r.is_empty() {
            return Err(MappingError::UnmappedType {
                type_name: self.graph.fq_name(t),
                location: self.location(m),
            });
        }
        Ok(r)
    }
}
