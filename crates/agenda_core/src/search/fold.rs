//! Text folding for case- and diacritic-insensitive comparison.
//!
//! # Invariants
//! - `fold_text` is idempotent: folding a folded string is a no-op.
//! - Output never has leading/trailing whitespace or repeated spaces.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns the canonical comparison form of `input`.
///
/// Applies NFD decomposition, drops combining marks, lowercases and collapses
/// whitespace runs to a single space.
pub fn fold_text(input: &str) -> String {
    let stripped = input
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase();
    WHITESPACE_RE.replace_all(stripped.trim(), " ").into_owned()
}
