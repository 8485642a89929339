//! Tag-scan complexity analyzer.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::traits::ComplexityAnalyzer;
use crate::types::ComplexityReport;

// Matches element open and close tags; the capture is the tag name.
// Comments and doctypes don't start with a letter so they never match.
static TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)([a-z][a-z0-9-]*)[^>]*?(/?)>").ok());

/// Void elements — they never nest, so they don't affect depth tracking.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Complexity analyzer based on a shallow regex tag scan
///
/// Not a conforming HTML parse; mismatched close tags simply stop
/// contributing to depth. The contract is best-effort: any input yields a
/// report, empty or unparseable input yields the all-zero default.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagScanAnalyzer;

impl TagScanAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }
}

impl ComplexityAnalyzer for TagScanAnalyzer {
    fn analyze(&self, html: &str) -> ComplexityReport {
        let Some(tag_re) = TAG.as_ref() else {
            return ComplexityReport::default();
        };
        if html.is_empty() {
            return ComplexityReport::default();
        }

        let mut report = ComplexityReport::default();
        let mut depth: usize = 0;

        for caps in tag_re.captures_iter(html) {
            let closing = !caps[1].is_empty();
            let self_closing = !caps[3].is_empty();
            let name = caps[2].to_ascii_lowercase();

            if closing {
                depth = depth.saturating_sub(1);
                continue;
            }

            report.element_count += 1;
            match name.as_str() {
                "table" => report.has_tables = true,
                "ul" | "ol" => report.has_lists = true,
                "pre" | "code" => report.has_code = true,
                _ => {}
            }

            if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                depth += 1;
                report.depth = report.depth.max(depth);
            }
        }

        trace!(
            elements = report.element_count,
            depth = report.depth,
            "analyzed document structure"
        );

        report
    }
}
