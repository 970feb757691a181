//! Include-path rewriting for generated files.
//!
//! Generated sources include the headers they were produced from. The
//! path written into the include directive can be rewritten with an
//! ordered list of `/pattern/replacement/` rules; the first rule whose
//! pattern matches wins.

use log::Level;
use regex::Regex;

use super::settings::SettingsError;

/// A compiled `/pattern/replacement/` rule.
///
/// The first character of the rule is the delimiter, so `#a/b#c#` is also
/// valid. `\N` back-references in the replacement are accepted as well as
/// the native `$N` form.
#[derive(Debug, Clone)]
pub struct RegexRule {
    source: String,
    pattern: Regex,
    replacement: String,
}

impl RegexRule {
    pub fn parse(rule: &str) -> Result<Self, SettingsError> {
        let invalid = |reason: &str| SettingsError::InvalidIncludeRegex {
            rule: rule.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = rule.chars();
        let delim = chars.next().ok_or_else(|| invalid("empty rule"))?;
        let body = chars.as_str();

        let parts = split_unescaped(body, delim);
        let (pattern, replacement) = match parts.as_slice() {
            [pattern, replacement, trailing] if trailing.is_empty() => (pattern, replacement),
            _ => return Err(invalid("expected /pattern/replacement/")),
        };

        let pattern = Regex::new(pattern).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            source: rule.to_string(),
            pattern,
            replacement: convert_backrefs(replacement),
        })
    }

    /// Rule text as configured.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Rewrite `path` if the pattern matches.
    pub fn apply(&self, path: &str) -> Option<String> {
        self.pattern
            .is_match(path)
            .then(|| self.pattern.replace(path, self.replacement.as_str()).into_owned())
    }
}

/// Split on `delim`, turning `\<delim>` into a literal delimiter. Other
/// escapes are kept for the regex engine.
fn split_unescaped(body: &str, delim: char) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        let Some(current) = parts.last_mut() else {
            break;
        };
        if c == '\\' {
            match chars.next() {
                Some(d) if d == delim => current.push(d),
                Some(d) => {
                    current.push(c);
                    current.push(d);
                }
                None => current.push(c),
            }
        } else if c == delim {
            parts.push(String::new());
        } else {
            current.push(c);
        }
    }

    parts
}

/// `\1` → `${1}`.
fn convert_backrefs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' || !chars.peek().is_some_and(char::is_ascii_digit) {
            out.push(c);
            continue;
        }

        out.push_str("${");
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            out.push(d);
        }
        out.push('}');
    }

    out
}

/// Rewrites include paths per the configured prefix and rules.
#[derive(Debug, Clone, Default)]
pub struct IncludeRewriter {
    prefix: String,
    rules: Vec<RegexRule>,
    with_brackets: bool,
    trace: bool,
}

impl IncludeRewriter {
    pub fn new(
        prefix: impl Into<String>,
        rules: &[String],
        with_brackets: bool,
        trace: bool,
    ) -> Result<Self, SettingsError> {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }

        let rules = rules
            .iter()
            .map(|r| RegexRule::parse(r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prefix,
            rules,
            with_brackets,
            trace,
        })
    }

    fn level(&self) -> Level {
        if self.trace {
            Level::Info
        } else {
            Level::Trace
        }
    }

    /// Rewrite `path` for an include directive.
    ///
    /// With `use_prefix` the configured prefix is prepended first. The
    /// result is wrapped in `<>` when `open` is `Some('<')`, in `""` when
    /// it is any other delimiter, and per the bracket setting when `None`.
    /// A path that already starts with `<` or `"` is not wrapped again.
    pub fn process(&self, path: &str, use_prefix: bool, open: Option<char>) -> String {
        let level = self.level();
        let path = if use_prefix {
            format!("{}{}", self.prefix, path)
        } else {
            path.to_string()
        };

        log::log!(level, path = path.as_str(); "include");

        let mut rewritten = None;
        for rule in &self.rules {
            let result = rule.apply(&path);
            log::log!(
                level,
                rule = rule.source(), matched = result.is_some();
                "include rule tried"
            );
            if result.is_some() {
                rewritten = result;
                break;
            }
        }

        let r = rewritten.unwrap_or(path);

        if r.is_empty() || r.starts_with('"') || r.starts_with('<') {
            return r;
        }

        let brackets = match open {
            Some(c) => c == '<',
            None => self.with_brackets,
        };
        if brackets {
            format!("<{}>", r)
        } else {
            format!("\"{}\"", r)
        }
    }
}
