//! Database dialect definitions.
//!
//! Each target database implements `SqlDialect` to describe what the
//! mapping engine needs to know about it:
//!
//! - Identifier quoting: `"` (PG/DuckDB), `` ` `` (MySQL), `[]` (T-SQL)
//! - Default type map: object-language fundamental types → column types
//! - Identity clause for auto-assigned object ids
//! - Identifier length limit
//!
//! The target is chosen by the `database` setting; [`Dialect`] dispatches
//! to the concrete implementation.

mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod tsql;

pub use duckdb::DuckDb;
pub use helpers::TypeMapping;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use tsql::TSql;

use serde::{Deserialize, Serialize};

/// Database dialect trait - describes one target database.
pub trait SqlDialect: std::fmt::Debug {
    /// Lowercase name, as written in the settings file.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column, key).
    ///
    /// - PostgreSQL/DuckDB: `"identifier"`
    /// - MySQL: `` `identifier` ``
    /// - T-SQL: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Default type map, keyed by fully-qualified object-language type.
    fn type_map(&self) -> &'static [TypeMapping];

    /// Column clause that makes the database assign identity values.
    ///
    /// `None` when the database needs a separate sequence instead.
    fn identity_clause(&self) -> Option<&'static str> {
        None
    }

    /// Longest identifier the database accepts.
    fn max_identifier_length(&self) -> usize {
        usize::MAX
    }
}

/// Supported database dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    DuckDb,
    TSql,
    MySql,
    Postgres,
}

impl Dialect {
    /// Concrete implementation behind this target.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::DuckDb => &DuckDb,
            Dialect::Postgres => &Postgres,
            Dialect::TSql => &TSql,
            Dialect::MySql => &MySql,
        }
    }
}

impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn type_map(&self) -> &'static [TypeMapping] {
        self.dialect().type_map()
    }

    fn identity_clause(&self) -> Option<&'static str> {
        self.dialect().identity_clause()
    }

    fn max_identifier_length(&self) -> usize {
        self.dialect().max_identifier_length()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
