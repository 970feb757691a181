//! Relational name representations.
//!
//! Tables live in a qualified namespace (`schema.table`), columns and keys
//! in the flat namespace of their table. Scopes and naming edges are
//! generic over [`NameRepr`] so both namespaces share one implementation.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use super::elements::{RelEdge, RelNode, RelScope};

/// Unqualified relational name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UName(String);

impl UName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Qualified relational name, e.g. `accounting.person`.
///
/// Components are split on `.` and empty ones are dropped on
/// construction, so a table without a schema is a single-component name
/// and `"a.b"` is the same name as `a` qualifying `b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QName(Vec<String>);

impl QName {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            components
                .into_iter()
                .flat_map(|c| {
                    let c: String = c.into();
                    c.split('.')
                        .filter(|part| !part.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }

    /// Name with an optional qualifier in front of `name`.
    pub fn qualified(qualifier: Option<&str>, name: impl Into<String>) -> Self {
        let name = name.into();
        match qualifier {
            Some(q) => Self::new([q.to_string(), name]),
            None => Self::new([name]),
        }
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Last component, the unqualified part.
    pub fn uname(&self) -> UName {
        UName::new(self.0.last().cloned().unwrap_or_default())
    }

    /// All components but the last.
    pub fn qualifier(&self) -> Option<QName> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(QName(self.0[..n - 1].to_vec())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        Self::new([s])
    }
}

impl From<UName> for QName {
    fn from(u: UName) -> Self {
        Self::new([u.0])
    }
}

/// A relational name representation.
///
/// Ties a name type to the scope facet and naming-edge variant that use
/// it.
pub trait NameRepr: Clone + Eq + Hash + fmt::Display + fmt::Debug {
    /// Human-readable label used in errors.
    const LABEL: &'static str;

    fn scope(node: &RelNode) -> Option<&RelScope<Self>>;

    fn scope_mut(node: &mut RelNode) -> Option<&mut RelScope<Self>>;

    /// Whether nodes of this kind may be named with this representation.
    fn names(node: &RelNode) -> bool;

    fn into_edge(self) -> RelEdge;

    fn from_edge(edge: &RelEdge) -> Option<&Self>;
}

impl NameRepr for UName {
    const LABEL: &'static str = "unqualified";

    fn scope(node: &RelNode) -> Option<&RelScope<Self>> {
        node.uscope.as_ref()
    }

    fn scope_mut(node: &mut RelNode) -> Option<&mut RelScope<Self>> {
        node.uscope.as_mut()
    }

    fn names(node: &RelNode) -> bool {
        !node.kind().is_table() && !node.kind().is_model()
    }

    fn into_edge(self) -> RelEdge {
        RelEdge::UNames(self)
    }

    fn from_edge(edge: &RelEdge) -> Option<&Self> {
        match edge {
            RelEdge::UNames(n) => Some(n),
            _ => None,
        }
    }
}

impl NameRepr for QName {
    const LABEL: &'static str = "qualified";

    fn scope(node: &RelNode) -> Option<&RelScope<Self>> {
        node.qscope.as_ref()
    }

    fn scope_mut(node: &mut RelNode) -> Option<&mut RelScope<Self>> {
        node.qscope.as_mut()
    }

    fn names(node: &RelNode) -> bool {
        node.kind().is_table()
    }

    fn into_edge(self) -> RelEdge {
        RelEdge::QNames(self)
    }

    fn from_edge(edge: &RelEdge) -> Option<&Self> {
        match edge {
            RelEdge::QNames(n) => Some(n),
            _ => None,
        }
    }
}
