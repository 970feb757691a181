//! SQL target support.
//!
//! - [`dialect`] - database dialects: identifier quoting, default type
//!   maps, identity clauses

pub mod dialect;

pub use dialect::{Dialect, SqlDialect, TypeMapping};
