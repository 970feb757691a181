//! TOML-based configuration for relmap.
//!
//! Supports a config file (relmap.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! database = "postgres"
//! table_prefix = "app_"
//! schema = "${APP_SCHEMA}"
//! reserved_words = ["select", "order"]
//!
//! [type_map."::std::string"]
//! type = "TEXT"
//! id_type = "VARCHAR(128)"
//!
//! [type_map."::money"]
//! type = "NUMERIC(12, 2)"
//!
//! [include]
//! prefix = "app/models"
//! regex = ["/(.+)\\.hxx$/$1-odb.hxx/"]
//! with_brackets = false
//! trace = false
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::include::IncludeRewriter;
use crate::ident::KeywordSet;
use crate::sql::dialect::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid include regex '{rule}': {reason}")]
    InvalidIncludeRegex { rule: String, reason: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Target database.
    pub database: Dialect,

    /// Prefix prepended to every table name.
    pub table_prefix: String,

    /// Schema that qualifies table names (supports ${ENV_VAR} expansion).
    pub schema: Option<String>,

    /// Identifiers to escape in addition to the output language keywords.
    pub reserved_words: Vec<String>,

    /// Per-type overrides of the database's default type map, keyed by
    /// fully-qualified type name.
    pub type_map: BTreeMap<String, TypeMapSettings>,

    /// Include-path rewriting.
    pub include: IncludeSettings,
}

/// Mapped database types for one object-language type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeMapSettings {
    /// Column type.
    #[serde(rename = "type")]
    pub type_: String,

    /// Column type when the member is an object identity. Defaults to
    /// `type`.
    #[serde(default)]
    pub id_type: Option<String>,
}

/// Include-path rewriting configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IncludeSettings {
    /// Directory prepended to generated include paths (supports
    /// ${ENV_VAR} expansion).
    pub prefix: Option<String>,

    /// `/pattern/replacement/` rules, tried in order.
    pub regex: Vec<String>,

    /// Wrap rewritten paths in `<>` instead of `""`.
    pub with_brackets: bool,

    /// Log every rule tried at info level instead of trace level.
    pub trace: bool,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `RELMAP_CONFIG`
    /// 2. `./relmap.toml`
    /// 3. `~/.config/relmap/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("RELMAP_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("relmap.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("relmap").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Schema qualifier with environment variables expanded. An empty
    /// schema counts as none.
    pub fn resolved_schema(&self) -> Result<Option<String>, SettingsError> {
        match &self.schema {
            Some(s) => {
                let s = expand_env_vars(s)?;
                Ok((!s.is_empty()).then_some(s))
            }
            None => Ok(None),
        }
    }

    /// Include prefix with environment variables expanded.
    pub fn resolved_include_prefix(&self) -> Result<String, SettingsError> {
        match &self.include.prefix {
            Some(p) => expand_env_vars(p),
            None => Ok(String::new()),
        }
    }

    /// Output-language keywords plus the configured reserved words.
    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::with_extra(self.reserved_words.iter().cloned())
    }

    /// Build the include-path rewriter, compiling every rule.
    pub fn include_rewriter(&self) -> Result<IncludeRewriter, SettingsError> {
        IncludeRewriter::new(
            self.resolved_include_prefix()?,
            &self.include.regex,
            self.include.with_brackets,
            self.include.trace,
        )
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR (ends at non-alphanumeric/underscore)
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
