//! Slug derivation for free-text character references.

/// Derives the canonical slug of a free-text string.
///
/// Lowercases, strips quotes and whitespace, and drops every character outside
/// `[a-z0-9_-]`. The result is idempotent: `slug(&slug(x)) == slug(x)`.
pub fn slug(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
        .collect()
}
