//! User-facing diagnostics.
//!
//! Reportable problems render as `file:line:column: error: message`.
//! Fatal errors are invariant violations; the user cannot fix them in
//! their sources, so they render as a generic internal error and the
//! details go to the log.

use std::fmt;

use crate::graph::Location;
use crate::mapping::{MappingError, SchemaConflict};
use crate::relational::RelationalGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Option<Location>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(location: Option<Location>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }

    pub fn note(location: Option<Location>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            location,
            message: message.into(),
        }
    }

    /// Report for a mapping error.
    pub fn from_mapping(e: &MappingError) -> Self {
        if e.is_fatal() {
            log::error!(error = e.to_string(); "Internal mapping error");
            return Self::error(None, "internal error while mapping; see the log for details");
        }
        Self::error(e.location().cloned(), e.to_string())
    }

    /// Report for a schema name conflict, naming both entities.
    pub fn from_conflict(model: &RelationalGraph, c: &SchemaConflict) -> Self {
        let d = &c.duplicate;
        let scope = match model.name(d.scope) {
            Some(name) if !name.is_empty() => format!("table '{}'", name),
            _ => "the schema".to_string(),
        };
        Self::error(
            Some(c.location.clone()),
            format!(
                "name '{}' in {} is already used by {} '{}'",
                d.name,
                scope,
                model.node(d.orig).kind().kind(),
                model.node(d.orig).id()
            ),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = &self.location {
            write!(f, "{}: ", l)?;
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}
