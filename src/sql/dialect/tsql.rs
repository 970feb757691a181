//! T-SQL (SQL Server) dialect.
//!
//! T-SQL differences from ANSI:
//! - Square bracket identifier quoting (`[name]`)
//! - BIT for booleans
//! - VARCHAR(MAX) cannot be a key; string identities use a bounded length

use super::helpers::{self, map, map_id, TypeMapping};
use super::SqlDialect;

const TYPE_MAP: &[TypeMapping] = &[
    map("bool", "BIT"),
    map("char", "CHAR(1)"),
    map("signed char", "TINYINT"),
    map("unsigned char", "TINYINT"),
    map("short int", "SMALLINT"),
    map("short unsigned int", "SMALLINT"),
    map("int", "INT"),
    map("unsigned int", "INT"),
    map("long int", "BIGINT"),
    map("long unsigned int", "BIGINT"),
    map("long long int", "BIGINT"),
    map("long long unsigned int", "BIGINT"),
    map("float", "REAL"),
    map("double", "FLOAT"),
    map_id("::std::string", "VARCHAR(512)", "VARCHAR(256)"),
];

/// T-SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn type_map(&self) -> &'static [TypeMapping] {
        TYPE_MAP
    }

    fn identity_clause(&self) -> Option<&'static str> {
        helpers::identity_tsql()
    }

    fn max_identifier_length(&self) -> usize {
        128
    }
}
