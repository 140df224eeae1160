//! Canonical name normalization
//!
//! Every generated symbol, file name and CSS class is derived from a single
//! [`CanonicalName`], so `my-button`, `my_button` and `MyButton` all land on
//! the same files.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{GenieError, Result};

/// Already-canonical names are returned untouched.
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid canonical pattern"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("valid separator pattern"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid word pattern"));

/// PascalCase identifier made of ASCII letters and digits, starting with an
/// upper-case letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used for CSS classes and mount selectors.
    pub fn css_class(&self) -> String {
        self.0.to_lowercase()
    }

    /// camelCase form used for hook/composable identifiers and store ids.
    pub fn camel(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize arbitrary user input into a [`CanonicalName`].
pub fn normalize(raw: &str) -> Result<CanonicalName> {
    if CANONICAL.is_match(raw) {
        return Ok(CanonicalName(raw.to_string()));
    }

    let lowered = raw.to_lowercase();
    let spaced = SEPARATORS.replace_all(&lowered, " ");
    let cleaned = NON_WORD.replace_all(&spaced, "");

    let mut out = String::with_capacity(cleaned.len());
    let mut capitalize_next = true;
    for c in cleaned.chars() {
        if c.is_whitespace() {
            capitalize_next = true;
        } else if capitalize_next {
            out.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }

    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(GenieError::InvalidName {
            raw: raw.to_string(),
        });
    }

    Ok(CanonicalName(out))
}

/// Remainder of a composable/hook style name (`useCart`, `use-cart`,
/// `UseCart`). Names that merely start with the letters, like `user`, are
/// not hooks.
pub fn hook_suffix(raw: &str) -> Option<&str> {
    let rest = raw
        .strip_prefix("use")
        .or_else(|| raw.strip_prefix("Use"))?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() || matches!(c, '-' | '_' | ' ') => Some(rest),
        _ => None,
    }
}

/// Normalize a hook name so that its camel form keeps the `use` prefix.
pub fn normalize_hook(raw: &str) -> Result<CanonicalName> {
    let rest = hook_suffix(raw).ok_or_else(|| GenieError::InvalidName {
        raw: raw.to_string(),
    })?;
    let rest = normalize(rest).map_err(|_| GenieError::InvalidName {
        raw: raw.to_string(),
    })?;
    Ok(CanonicalName(format!("Use{}", rest)))
}
