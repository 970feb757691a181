//! Building blocks shared by the dialect implementations: identifier
//! quoting, default type-map entries and identity clauses.

// ---------------------------------------------------------------------------
// Quoting
// ---------------------------------------------------------------------------

/// `"name"`, doubling embedded quotes. Postgres and DuckDB.
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `` `name` ``. MySQL.
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `[name]`, doubling a closing bracket. SQL Server.
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// ---------------------------------------------------------------------------
// Type maps
// ---------------------------------------------------------------------------

/// Default mapping of one object-language type to database column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Fully-qualified object-language type name.
    pub name: &'static str,
    /// Column type.
    pub type_: &'static str,
    /// Column type for identity members, when it differs.
    pub id_type: Option<&'static str>,
}

/// Shorthand for a mapping whose identity type is the column type.
pub const fn map(name: &'static str, type_: &'static str) -> TypeMapping {
    TypeMapping {
        name,
        type_,
        id_type: None,
    }
}

/// Shorthand for a mapping with a distinct identity type.
pub const fn map_id(name: &'static str, type_: &'static str, id_type: &'static str) -> TypeMapping {
    TypeMapping {
        name,
        type_,
        id_type: Some(id_type),
    }
}

// ---------------------------------------------------------------------------
// Identity columns
// ---------------------------------------------------------------------------

/// Identity clause for Postgres.
pub fn identity_postgres() -> Option<&'static str> {
    Some("GENERATED BY DEFAULT AS IDENTITY")
}

/// Identity clause for T-SQL.
pub fn identity_tsql() -> Option<&'static str> {
    Some("IDENTITY(1, 1)")
}

/// Identity clause for MySQL.
pub fn identity_mysql() -> Option<&'static str> {
    Some("AUTO_INCREMENT")
}
