//! DuckDB dialect.
//!
//! DuckDB is PostgreSQL-compatible with extensions:
//! - ANSI identifier quoting (`"`)
//! - Native unsigned integer types (UTINYINT ... UBIGINT)
//! - Identity columns come from sequences, not a column clause

use super::helpers::{self, map, TypeMapping};
use super::SqlDialect;

const TYPE_MAP: &[TypeMapping] = &[
    map("bool", "BOOLEAN"),
    map("char", "VARCHAR(1)"),
    map("signed char", "TINYINT"),
    map("unsigned char", "UTINYINT"),
    map("short int", "SMALLINT"),
    map("short unsigned int", "USMALLINT"),
    map("int", "INTEGER"),
    map("unsigned int", "UINTEGER"),
    map("long int", "BIGINT"),
    map("long unsigned int", "UBIGINT"),
    map("long long int", "BIGINT"),
    map("long long unsigned int", "UBIGINT"),
    map("float", "FLOAT"),
    map("double", "DOUBLE"),
    map("::std::string", "VARCHAR"),
];

/// DuckDB dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn type_map(&self) -> &'static [TypeMapping] {
        TYPE_MAP
    }
}
