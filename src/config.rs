//! Configuration types for html2md-batch

use serde::{Deserialize, Serialize};

/// How export filenames are derived from original filenames
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// Keep the original base name, only the extension changes
    #[default]
    Original,
    /// Append the current UTC time to the base name
    Timestamp,
    /// Append a zero-padded 3-digit index to the base name
    Indexed,
}

/// Markdown heading rendering style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    /// `# Heading` prefixes
    #[default]
    Atx,
    /// Underlined `=====` / `-----` headings
    Setext,
}

/// Markdown code block rendering style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockStyle {
    /// Triple-backtick fences
    #[default]
    Fenced,
    /// Four-space indentation
    Indented,
}

/// Options forwarded verbatim to the [`HtmlConverter`](crate::conversion::HtmlConverter) seam
///
/// The batch pipeline does not interpret these; they exist so a whole batch
/// converts with one consistent output style.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Heading rendering style
    #[serde(default)]
    pub heading_style: HeadingStyle,

    /// Code block rendering style
    #[serde(default)]
    pub code_block_style: CodeBlockStyle,

    /// Marker for unordered list items (default: "-")
    #[serde(default = "default_bullet_marker")]
    pub bullet_marker: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::default(),
            code_block_style: CodeBlockStyle::default(),
            bullet_marker: default_bullet_marker(),
        }
    }
}

/// Main configuration for [`BatchProcessor`](crate::processor::BatchProcessor)
///
/// Supplied by the caller and mutable between runs via
/// [`set_config`](crate::processor::BatchProcessor::set_config). Changes do
/// not affect a pass already in flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum conversions in flight within one window (default: 3)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Whether a processing pass also re-attempts previously failed records
    #[serde(default)]
    pub auto_retry: bool,

    /// Abort the in-flight batch between windows on first failure
    #[serde(default)]
    pub stop_on_error: bool,

    /// How export filenames are derived
    #[serde(default)]
    pub naming: NamingConvention,

    /// Conversion output style, forwarded to the converter
    #[serde(default)]
    pub convert: ConvertOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            auto_retry: false,
            stop_on_error: false,
            naming: NamingConvention::default(),
            convert: ConvertOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Return a copy with `max_concurrent` clamped to at least 1
    ///
    /// A zero ceiling would make every window empty and the batch would never
    /// drain, so the processor normalizes configs on the way in.
    pub fn normalized(mut self) -> Self {
        if self.max_concurrent == 0 {
            tracing::warn!("max_concurrent of 0 clamped to 1");
            self.max_concurrent = 1;
        }
        self
    }
}

fn default_max_concurrent() -> usize {
    3
}

fn default_bullet_marker() -> String {
    "-".to_string()
}
