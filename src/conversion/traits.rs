//! Trait seams for the conversion pipeline.

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::types::ComplexityReport;

/// HTML-to-Markdown conversion engine
///
/// Implementations may fail on malformed input but must return an empty
/// string for empty input without failing. Conversion is treated as
/// CPU-bound and synchronous per document; the batch processor runs it off
/// the async runtime.
pub trait HtmlConverter: Send + Sync {
    /// Convert sanitized HTML into Markdown
    fn convert(
        &self,
        html: &str,
        options: &ConvertOptions,
    ) -> std::result::Result<String, ConvertError>;
}

/// Best-effort HTML cleaner applied before conversion
///
/// Implementations must not fail: on any internal problem they return the
/// input unchanged rather than erroring.
pub trait Sanitizer: Send + Sync {
    /// Return a cleaned copy of `html`
    fn sanitize(&self, html: &str) -> String;
}

/// Structural analysis of an HTML document, computed once at registration
///
/// Implementations must not fail: empty or unparseable input yields an
/// all-zero/false [`ComplexityReport`].
pub trait ComplexityAnalyzer: Send + Sync {
    /// Analyze `html` and report its structure
    fn analyze(&self, html: &str) -> ComplexityReport;
}

/// Adapter implementing [`HtmlConverter`] for any matching closure
///
/// The conversion algorithm itself lives outside this crate; `FnConverter`
/// is the zero-ceremony way to plug one in.
///
/// # Examples
///
/// ```
/// use html2md_batch::{ConvertError, ConvertOptions, FnConverter, HtmlConverter};
///
/// let converter = FnConverter::new(|html: &str, _options: &ConvertOptions| {
///     Ok(html.replace("<p>", "").replace("</p>", "\n"))
/// });
/// let md = converter.convert("<p>hello</p>", &ConvertOptions::default()).unwrap();
/// assert_eq!(md, "hello\n");
/// ```
pub struct FnConverter<F> {
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&str, &ConvertOptions) -> std::result::Result<String, ConvertError> + Send + Sync,
{
    /// Wrap a conversion closure
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> HtmlConverter for FnConverter<F>
where
    F: Fn(&str, &ConvertOptions) -> std::result::Result<String, ConvertError> + Send + Sync,
{
    fn convert(
        &self,
        html: &str,
        options: &ConvertOptions,
    ) -> std::result::Result<String, ConvertError> {
        (self.f)(html, options)
    }
}
