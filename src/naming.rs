//! Filename parsing for the `NNN-slug` convention.
//!
//! Blog posts and projects are ordered by an optional numeric prefix on their
//! file name; the remainder becomes the URL key:
//!
//! - `010-ai-native-erp-sap-2026.md` → position 10, slug `ai-native-erp-sap-2026`
//! - `sap-btp-strategic-insights.md` → no position, slug `sap-btp-strategic-insights`
//!
//! Unnumbered entries are still published; they just list after the
//! numbered ones.

/// Result of parsing a file stem like `010-ai-native-erp`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-ai-native-erp`).
    pub position: Option<u32>,
    /// Everything after `NNN-`. For unnumbered stems, the whole stem.
    /// Empty for number-only stems.
    pub slug: String,
}

/// Parse a file stem following the `NNN-slug` convention.
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-') {
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedName {
                position: Some(num),
                slug: rest.to_string(),
            };
        }
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ParsedName {
            position: Some(num),
            slug: String::new(),
        };
    }
    ParsedName {
        position: None,
        slug: stem.to_string(),
    }
}

/// Whether a slug is safe to use as a single URL path segment.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Sort key: numbered entries first (by number), then unnumbered by slug.
pub fn order_key(position: Option<u32>, slug: &str) -> (bool, u32, String) {
    (position.is_none(), position.unwrap_or(0), slug.to_string())
}
