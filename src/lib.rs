//! # relmap
//!
//! Object-relational mapping compiler core: derives a relational schema
//! from the declarations of an object-oriented source language.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                front end (external)                      │
//! │   parses sources, annotates declarations with pragmas    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SemanticGraph                           │
//! │  (scopes, classes, data members, types, templates)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [mapping::Context]
//! ┌─────────────────────────────────────────────────────────┐
//! │   names, nullability, types, options, column counts,     │
//! │   identity members, containment (memoized per node)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [build_schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 RelationalGraph                          │
//! │        (tables, columns, primary/foreign keys)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//!                  emitters (external)
//! ```

pub mod config;
pub mod diagnostics;
pub mod graph;
pub mod ident;
pub mod mapping;
pub mod relational;
pub mod semantic;
pub mod sql;

pub use sql::dialect;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::graph::{Location, NodeIndex};
    pub use crate::mapping::{
        ClassKind, Context, MappingError, MappingResult, MemberTest, TablePrefix,
    };
    pub use crate::relational::{QName, RelationalGraph, UName};
    pub use crate::semantic::{keys, SemanticGraph};
}

// Also export at crate root for convenience
pub use config::Settings;
pub use dialect::Dialect;
pub use mapping::Context;
pub use relational::RelationalGraph;
pub use semantic::SemanticGraph;
