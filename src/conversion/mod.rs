//! Conversion seams — pluggable sanitizer, converter, and complexity analyzer.
//!
//! The batch pipeline treats the actual HTML-to-Markdown translation as an
//! external collaborator behind the [`HtmlConverter`] trait. This module
//! defines the three trait seams plus shipped implementations:
//! - [`RegexSanitizer`] — best-effort script/style/event-handler stripping
//! - [`TagScanAnalyzer`] — complexity analysis via a shallow tag scan
//! - [`FnConverter`] — adapter wrapping any conversion closure

mod analyzer;
mod sanitizer;
mod traits;

pub use analyzer::TagScanAnalyzer;
pub use sanitizer::RegexSanitizer;
pub use traits::{ComplexityAnalyzer, FnConverter, HtmlConverter, Sanitizer};
