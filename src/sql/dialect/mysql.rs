//! MySQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - Boolean is TINYINT(1)
//! - UNSIGNED integer variants
//! - TEXT cannot be a key without a length; string identities use VARCHAR

use super::helpers::{self, map, map_id, TypeMapping};
use super::SqlDialect;

const TYPE_MAP: &[TypeMapping] = &[
    map("bool", "TINYINT(1)"),
    map("char", "CHAR(1)"),
    map("signed char", "TINYINT"),
    map("unsigned char", "TINYINT UNSIGNED"),
    map("short int", "SMALLINT"),
    map("short unsigned int", "SMALLINT UNSIGNED"),
    map("int", "INT"),
    map("unsigned int", "INT UNSIGNED"),
    map("long int", "BIGINT"),
    map("long unsigned int", "BIGINT UNSIGNED"),
    map("long long int", "BIGINT"),
    map("long long unsigned int", "BIGINT UNSIGNED"),
    map("float", "FLOAT"),
    map("double", "DOUBLE"),
    map_id("::std::string", "TEXT", "VARCHAR(128)"),
];

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn type_map(&self) -> &'static [TypeMapping] {
        TYPE_MAP
    }

    fn identity_clause(&self) -> Option<&'static str> {
        helpers::identity_mysql()
    }

    fn max_identifier_length(&self) -> usize {
        64
    }
}
