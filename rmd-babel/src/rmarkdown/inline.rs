//! Inline R expressions (`` `r expr` ``)
//!
//! Text containing inline expressions cannot stay a Markdown cell: it has to be run through the
//! Markdown kernel's `%expand` magic to substitute the values. The scanner therefore moves such
//! text into its own cell, keeping the preceding whole paragraphs as ordinary Markdown.

use super::lines::{is_blank, is_heading};
use crate::notebook::{CellMetadata, Visibility};

/// Magic line prepended to relocated text so the Markdown kernel expands `` `r ` `` spans in R.
pub const EXPAND_MAGIC: &str = "%expand `r ` --in R";

/// Detect an inline expression: `` `r `` followed by at least one character and a closing
/// backtick on the same line.
pub fn has_inline_span(line: &str) -> bool {
    let Some(start) = line.find("`r") else {
        return false;
    };
    line[start + 2..]
        .char_indices()
        .skip(1)
        .any(|(_, c)| c == '`')
}

/// Metadata of a cell holding relocated inline expressions: run by the Markdown kernel, input
/// hidden, output reported.
pub fn expansion_metadata() -> CellMetadata {
    CellMetadata {
        chunk_options: None,
        visibility: Some(Visibility {
            output_hidden: None,
            source_hidden: Some(true),
        }),
        kernel: Some(super::engines::MARKDOWN_KERNEL.0.to_string()),
        tags: vec!["report_output".to_string()],
        ..CellMetadata::default()
    }
}

/// Where to cut a prose buffer before relocating an inline expression.
///
/// Walks back from the last buffered line over non-blank lines and stops at the nearest blank
/// line (never looking at the first line). Returns the number of leading lines to flush as plain
/// Markdown, or `None` when the buffer should be relocated whole.
pub fn split_point<S: AsRef<str>>(buffer: &[S]) -> Option<usize> {
    let last = buffer.last()?;
    let mut boundary = buffer.len() - 1;
    while boundary > 0 && !is_blank(buffer[boundary].as_ref()) {
        boundary -= 1;
    }
    (boundary > 0 || is_heading(last.as_ref())).then_some(boundary + 1)
}
