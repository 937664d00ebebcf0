//! Shared constants used across the application

/// Column width applied to metadata values when no width is configured.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Explicit line break understood inside a single Markdown table cell.
/// Raw newlines would end the table row, so wrapped cells use this instead.
pub const MARKDOWN_LINE_BREAK: &str = "<br>";

/// Value shown for absent metadata fields.
pub const PLACEHOLDER: &str = "N/A";

/// `strftime` pattern used for the Created row.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Horizontal rule printed between output sections.
pub const SECTION_SEPARATOR: &str = "---";
