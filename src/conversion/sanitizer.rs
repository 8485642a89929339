//! Regex-based HTML sanitizer.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::traits::Sanitizer;

/// Patterns stripped from input, in application order.
///
/// Script and style elements are removed with their content; inline event
/// handler attributes (`onclick=...` and friends) are removed in their
/// quoted and unquoted forms.
const STRIP_PATTERNS: [&str; 5] = [
    r"(?is)<script\b[^>]*>.*?</script\s*>",
    r"(?is)<style\b[^>]*>.*?</style\s*>",
    r#"(?i)\son[a-z]+\s*=\s*"[^"]*""#,
    r"(?i)\son[a-z]+\s*=\s*'[^']*'",
    r"(?i)\son[a-z]+\s*=\s*[^\s>]+",
];

// Patterns are static and compile at first use; any that fail to build are
// skipped so sanitize() can never fail.
static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRIP_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Best-effort sanitizer stripping scripts, styles, and inline event handlers
///
/// Cleaning is textual, not a real HTML parse — good enough to keep active
/// content out of the converter, and guaranteed never to fail: in the worst
/// case the input comes back unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexSanitizer;

impl RegexSanitizer {
    /// Create a new sanitizer
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for RegexSanitizer {
    fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let mut cleaned = html.to_string();
        for pattern in COMPILED.iter() {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }

        if cleaned.len() != html.len() {
            debug!(
                removed_bytes = html.len() - cleaned.len(),
                "sanitizer stripped active content"
            );
        }

        cleaned
    }
}
