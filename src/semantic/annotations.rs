//! Front-end annotation bag.
//!
//! The front end attaches source-level pragma facts to semantic nodes
//! ("this class is an object", "this member is the id", "use column
//! name X"). Keys are strings because many of them are composed at run
//! time from a key prefix (`value-null`, `key-column`, `index-options`).
//! The mapping engine only reads this bag; derived facts go to the
//! node's [`FactCache`](crate::graph::FactCache) instead.

use std::collections::HashMap;

use crate::graph::NodeIndex;

/// Well-known annotation keys.
pub mod keys {
    // Class kind.
    pub const OBJECT: &str = "object";
    pub const VIEW: &str = "view";
    pub const VALUE: &str = "value";

    // Naming and column overrides.
    pub const TABLE: &str = "table";
    pub const COLUMN: &str = "column";
    pub const TYPE: &str = "type";
    pub const ID_TYPE: &str = "id-type";
    pub const VALUE_TYPE: &str = "value-type";
    pub const INDEX_TYPE: &str = "index-type";
    pub const KEY_TYPE: &str = "key-type";
    pub const ID_COLUMN: &str = "id-column";
    pub const VALUE_COLUMN: &str = "value-column";
    pub const INDEX_COLUMN: &str = "index-column";
    pub const KEY_COLUMN: &str = "key-column";
    pub const DEFAULT: &str = "default";
    pub const OPTIONS: &str = "options";
    pub const ID_OPTIONS: &str = "id-options";
    pub const VALUE_OPTIONS: &str = "value-options";
    pub const INDEX_OPTIONS: &str = "index-options";
    pub const KEY_OPTIONS: &str = "key-options";

    // Nullability.
    pub const NULL: &str = "null";
    pub const NOT_NULL: &str = "not-null";
    pub const VALUE_NULL: &str = "value-null";
    pub const VALUE_NOT_NULL: &str = "value-not-null";

    // Members.
    pub const ID: &str = "id";
    pub const AUTO: &str = "auto";
    pub const INVERSE: &str = "inverse";
    pub const TRANSIENT: &str = "transient";
    pub const UNORDERED: &str = "unordered";

    // Pointers.
    pub const ELEMENT_TYPE: &str = "element-type";
    pub const POINTER_LAZY: &str = "pointer-lazy";

    // Wrappers.
    pub const WRAPPER: &str = "wrapper";
    pub const WRAPPER_TYPE: &str = "wrapper-type";
    pub const WRAPPER_NULL_HANDLER: &str = "wrapper-null-handler";
    pub const WRAPPER_NULL_DEFAULT: &str = "wrapper-null-default";

    // Containers.
    pub const CONTAINER_KIND: &str = "container-kind";
    pub const TREE_TYPE: &str = "tree-type";
}

/// Compose a key-path annotation key: `keyed("value", "null")` is
/// `"value-null"`; an empty prefix yields the bare key.
pub fn keyed(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}-{}", prefix, key)
    }
}

/// A single annotation value. The type is fixed by key convention.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// Presence-only marker.
    Flag,
    Bool(bool),
    Str(String),
    Strings(Vec<String>),
    /// Reference to another semantic node (wrapped type, inverse member).
    Node(NodeIndex),
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Bool(b)
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::Str(s.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::Str(s)
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(v: Vec<String>) -> Self {
        AnnotationValue::Strings(v)
    }
}

impl From<NodeIndex> for AnnotationValue {
    fn from(n: NodeIndex) -> Self {
        AnnotationValue::Node(n)
    }
}

/// String-keyed annotation bag attached to every semantic node.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    values: HashMap<String, AnnotationValue>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Set a presence-only marker.
    pub fn flag(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), AnnotationValue::Flag);
    }

    /// Whether `key` is present, whatever its value.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// Boolean value of `key`; a `Flag` reads as true, anything else
    /// (including absence) as false.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.values.get(key),
            Some(AnnotationValue::Flag) | Some(AnnotationValue::Bool(true))
        )
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AnnotationValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_strings(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key) {
            Some(AnnotationValue::Strings(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        match self.values.get(key) {
            Some(AnnotationValue::Node(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
