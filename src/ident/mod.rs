//! Identifier and literal utilities.
//!
//! Helpers shared by the mapping engine and by code emitters:
//!
//! - [`escape`] - rewrite a name into a legal bare identifier
//! - [`public_name_db`] - derive the database-facing name of a member
//! - [`strlit`] - encode bytes as a quoted string literal
//! - [`OutputStack`] - strictly paired output redirection

mod literal;
mod output;

pub use literal::strlit;
pub use output::{OutputError, OutputStack, Sink};

use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved words of the output language.
const KEYWORDS: &[&str] = &[
    "NULL",
    "and",
    "asm",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "class",
    "compl",
    "const",
    "const_cast",
    "continue",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "end_eq",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "not",
    "not_eq",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

static DEFAULT_KEYWORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| KEYWORDS.iter().map(|k| k.to_string()).collect());

/// Prefix for identifiers that start with a digit.
const DIGIT_PREFIX: &str = "cxx_";

/// Prefix for identifiers that start with any other invalid character,
/// and the fallback for an empty identifier.
const INVALID_PREFIX: &str = "cxx";

/// Set of reserved words an identifier must not collide with.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    words: HashSet<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self {
            words: DEFAULT_KEYWORDS.clone(),
        }
    }
}

impl KeywordSet {
    /// The output language's keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Default keywords plus `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.words.extend(extra.into_iter().map(Into::into));
        set
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Rewrite `name` into a legal bare identifier.
///
/// A leading digit gets the `cxx_` prefix, any other invalid first
/// character gets `cxx`. Every invalid character becomes `_`. An empty
/// name becomes `cxx`, and a reserved word gets one trailing `_`.
pub fn escape(name: &str, keywords: &KeywordSet) -> String {
    let mut r = String::with_capacity(name.len());

    for (i, c) in name.chars().enumerate() {
        if i == 0 && !is_ident_start(c) {
            r.push_str(if c.is_ascii_digit() {
                DIGIT_PREFIX
            } else {
                INVALID_PREFIX
            });
        }
        r.push(if is_ident_char(c) { c } else { '_' });
    }

    if r.is_empty() {
        r.push_str(INVALID_PREFIX);
    }

    if keywords.contains(&r) {
        r.push('_');
    }

    r
}

/// Database-facing name of a member.
///
/// Strips an `m_` marker and then leading and trailing underscores. If
/// nothing would be left, the name is returned unchanged.
pub fn public_name_db(name: &str) -> String {
    let body = match name.strip_prefix("m_") {
        Some(rest) if name.len() > 2 => rest,
        _ => name,
    };

    let stripped = body.trim_matches('_');
    if stripped.is_empty() {
        name.to_string()
    } else {
        stripped.to_string()
    }
}

/// Output-language name of a member: the database-facing name, escaped.
pub fn public_name(name: &str, keywords: &KeywordSet) -> String {
    escape(&public_name_db(name), keywords)
}

/// ASCII upper-case conversion.
pub fn upcase(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// Flatten a fully-qualified name into an identifier: `::a::b` → `a_b`.
pub fn flat_name(fq: &str) -> String {
    fq.split("::")
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
