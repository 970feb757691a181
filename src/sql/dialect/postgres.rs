//! PostgreSQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type
//! - No unsigned integers; unsigned types map to the signed type of the
//!   same width

use super::helpers::{self, map, TypeMapping};
use super::SqlDialect;

const TYPE_MAP: &[TypeMapping] = &[
    map("bool", "BOOLEAN"),
    map("char", "CHAR(1)"),
    map("signed char", "SMALLINT"),
    map("unsigned char", "SMALLINT"),
    map("short int", "SMALLINT"),
    map("short unsigned int", "SMALLINT"),
    map("int", "INTEGER"),
    map("unsigned int", "INTEGER"),
    map("long int", "BIGINT"),
    map("long unsigned int", "BIGINT"),
    map("long long int", "BIGINT"),
    map("long long unsigned int", "BIGINT"),
    map("float", "REAL"),
    map("double", "DOUBLE PRECISION"),
    map("::std::string", "TEXT"),
];

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn type_map(&self) -> &'static [TypeMapping] {
        TYPE_MAP
    }

    fn identity_clause(&self) -> Option<&'static str> {
        helpers::identity_postgres()
    }

    fn max_identifier_length(&self) -> usize {
        63
    }
}
