//! Classification of classes, types and members.

use serde::Serialize;

use crate::graph::NodeIndex;
use crate::semantic::{keyed, keys, NodeKind};

use super::{Context, MappingError, MappingResult};

/// Annotations that disqualify a `value` class from being a composite:
/// any of them means the class maps to a single column.
const SIMPLE_VALUE_KEYS: &[&str] = &[
    keys::TABLE,
    keys::TYPE,
    keys::ID_TYPE,
    keys::VALUE_TYPE,
    keys::INDEX_TYPE,
    keys::KEY_TYPE,
    keys::VALUE_COLUMN,
    keys::INDEX_COLUMN,
    keys::KEY_COLUMN,
    keys::ID_COLUMN,
    keys::DEFAULT,
    keys::NULL,
    keys::NOT_NULL,
    keys::VALUE_NULL,
    keys::VALUE_NOT_NULL,
    keys::OPTIONS,
    keys::VALUE_OPTIONS,
    keys::INDEX_OPTIONS,
    keys::KEY_OPTIONS,
    keys::ID_OPTIONS,
    keys::UNORDERED,
];

/// How a class participates in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// Persistent class with its own table.
    Object,
    /// Read-only projection.
    View,
    /// Value class embedded as a group of columns.
    Composite,
    Other,
}

/// Container shapes, as annotated by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Ordered,
    Set,
    Multiset,
    Map,
    Multimap,
}

impl ContainerKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ordered" | "vector" | "list" => Some(ContainerKind::Ordered),
            "set" => Some(ContainerKind::Set),
            "multiset" => Some(ContainerKind::Multiset),
            "map" => Some(ContainerKind::Map),
            "multimap" => Some(ContainerKind::Multimap),
            _ => None,
        }
    }

    /// Whether elements carry a key column.
    pub fn is_map(self) -> bool {
        matches!(self, ContainerKind::Map | ContainerKind::Multimap)
    }
}

impl Context<'_> {
    pub fn is_qualifier(&self, t: NodeIndex) -> bool {
        matches!(self.graph.node(t).kind(), NodeKind::Qualifier { .. })
    }

    /// `t` with cv-qualifiers stripped.
    pub fn unqualified(&self, t: NodeIndex) -> NodeIndex {
        let mut t = t;
        while self.is_qualifier(t) {
            match self.graph.qualifier_base(t) {
                Some(base) => t = base,
                None => break,
            }
        }
        t
    }

    pub fn is_object(&self, c: NodeIndex) -> bool {
        self.graph.node(c).is_class() && self.annotations(c).has(keys::OBJECT)
    }

    pub fn is_view(&self, c: NodeIndex) -> bool {
        self.graph.node(c).is_class() && self.annotations(c).has(keys::VIEW)
    }

    /// Whether `c` is a composite value class. Computed once per class.
    pub fn composite(&self, c: NodeIndex) -> bool {
        let node = self.graph.node(c);
        if !node.is_class() {
            return false;
        }
        node.facts().composite_value(|| {
            let a = node.annotations();
            a.has(keys::VALUE) && !SIMPLE_VALUE_KEYS.iter().any(|k| a.has(k))
        })
    }

    pub fn class_kind(&self, c: NodeIndex) -> ClassKind {
        if self.is_object(c) {
            ClassKind::Object
        } else if self.is_view(c) {
            ClassKind::View
        } else if self.composite(c) {
            ClassKind::Composite
        } else {
            ClassKind::Other
        }
    }

    /// The composite class behind `t`, seeing through one wrapper.
    pub fn composite_wrapper(&self, t: NodeIndex) -> Option<NodeIndex> {
        let t = self.unqualified(t);
        if self.composite(t) {
            return Some(t);
        }
        let wt = self.unqualified(self.wrapper(t)?);
        self.composite(wt).then_some(wt)
    }

    /// Class an object-pointer type points to.
    pub fn object_pointer(&self, t: NodeIndex) -> Option<NodeIndex> {
        self.annotations(self.unqualified(t))
            .get_node(keys::ELEMENT_TYPE)
    }

    pub fn lazy_pointer(&self, t: NodeIndex) -> bool {
        self.annotations(self.unqualified(t))
            .get_bool(keys::POINTER_LAZY)
    }

    /// Type wrapped by `t`, when `t` is a wrapper.
    pub fn wrapper(&self, t: NodeIndex) -> Option<NodeIndex> {
        let a = self.annotations(self.unqualified(t));
        if a.get_bool(keys::WRAPPER) {
            a.get_node(keys::WRAPPER_TYPE)
        } else {
            None
        }
    }

    pub fn container(&self, t: NodeIndex) -> bool {
        self.annotations(self.unqualified(t))
            .has(keys::CONTAINER_KIND)
    }

    /// The container type behind `t`, seeing through one wrapper.
    pub fn container_wrapper(&self, t: NodeIndex) -> Option<NodeIndex> {
        let t = self.unqualified(t);
        if self.container(t) {
            return Some(t);
        }
        let wt = self.unqualified(self.wrapper(t)?);
        self.container(wt).then_some(wt)
    }

    pub fn container_kind(&self, c: NodeIndex) -> MappingResult<ContainerKind> {
        let kind = self.annotations(c).get_str(keys::CONTAINER_KIND).unwrap_or("");
        ContainerKind::parse(kind).ok_or_else(|| {
            MappingError::internal(c, format!("unknown container kind '{}'", kind))
        })
    }

    /// Whether the container member `m` has an index column.
    pub fn ordered(&self, m: NodeIndex, c: NodeIndex) -> MappingResult<bool> {
        Ok(self.container_kind(c)? == ContainerKind::Ordered
            && !self.annotations(m).has(keys::UNORDERED)
            && !self.annotations(c).has(keys::UNORDERED))
    }

    /// Type of `m`, or of its `kp` sub-value (`value`, `key`, `index`).
    ///
    /// The sub-value type comes from the member's `<kp>-tree-type`, else
    /// from the wrapped type when the member's type is a wrapper, else
    /// from the member's type.
    pub fn member_type(&self, m: NodeIndex, kp: &str) -> MappingResult<NodeIndex> {
        let t = self
            .graph
            .type_of(m)
            .ok_or_else(|| MappingError::internal(m, "instance has no type"))?;
        if kp.is_empty() {
            return Ok(t);
        }

        let key = keyed(kp, keys::TREE_TYPE);
        if let Some(n) = self.annotations(m).get_node(&key) {
            return Ok(n);
        }

        let t = self.unqualified(t);
        let holder = match self.wrapper(t) {
            Some(wt) => self.unqualified(wt),
            None => t,
        };
        self.annotations(holder)
            .get_node(&key)
            .ok_or_else(|| MappingError::internal(m, format!("no {} type", kp)))
    }

    /// Whether `m` (or its `kp` sub-value) is the inverse side of an
    /// object relationship.
    pub fn inverse(&self, m: NodeIndex, kp: &str) -> MappingResult<bool> {
        let t = self.member_type(m, kp)?;
        Ok(self.object_pointer(t).is_some() && self.annotations(m).has(&keyed(kp, keys::INVERSE)))
    }

    pub fn transient(&self, m: NodeIndex) -> bool {
        self.annotations(m).has(keys::TRANSIENT)
    }

    pub fn is_id(&self, m: NodeIndex) -> bool {
        self.annotations(m).has(keys::ID)
    }
}
