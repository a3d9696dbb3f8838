//! URL slugs for state and city names.
//!
//! Slugs are routing keys and show up in every published URL, so the
//! transformation must stay byte-for-byte stable across releases.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid regex"));
static SEPARATOR_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid regex"));
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lowercase `text`, drop everything outside `[a-z0-9_\s-]`, collapse runs of
/// whitespace, underscores and hyphens into one hyphen, then trim hyphens.
///
/// ```
/// assert_eq!(consign_core::slugify("St. Louis"), "st-louis");
/// assert_eq!(consign_core::slugify("New York"), "new-york");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED_RE.replace_all(&lowered, "");
    let joined = SEPARATOR_RUN_RE.replace_all(&kept, "-");
    joined.trim_matches('-').to_string()
}

#[must_use]
pub fn state_slug(name: &str) -> String {
    slugify(name)
}

#[must_use]
pub fn city_slug(name: &str) -> String {
    slugify(name)
}

/// In-page anchor for a store card: lowercased name with whitespace runs
/// replaced by `-`. Punctuation is kept.
#[must_use]
pub fn anchor_id(business_name: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(&business_name.to_lowercase(), "-")
        .into_owned()
}
