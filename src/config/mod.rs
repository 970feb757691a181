//! Configuration module for relmap.
//!
//! Handles the settings file, environment variables, and include-path
//! rewriting rules.

mod include;
mod settings;

pub use include::{IncludeRewriter, RegexRule};
pub use settings::{
    expand_env_vars, IncludeSettings, Settings, SettingsError, TypeMapSettings,
};
