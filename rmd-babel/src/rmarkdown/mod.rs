//! R Markdown reader
//!
//!     Converts an R Markdown document into a SoS notebook in one pass:
//!
//!         source ─▶ front_matter::extract ─▶ scanner::scan ─▶ notebook::build_notebook
//!
//!     - `front_matter`: YAML header between `---` lines.
//!     - `fence`: chunk fences, chunk options, visibility.
//!     - `engines`: knitr engine → SoS kernel mapping and the used-kernel list.
//!     - `inline`: relocation of text holding `` `r expr` `` spans.
//!     - `scanner`: the prose/code state machine driving the above.
//!     - `assembler`: line buffers → numbered blocks.
//!
//!     Only fenced chunks and Markdown are understood. Inline expressions are moved into cells the
//!     Markdown kernel can expand, never evaluated here.

pub mod assembler;
pub mod engines;
pub mod fence;
pub mod front_matter;
pub mod inline;
pub mod lines;
pub mod scanner;

use crate::error::FormatError;
use crate::format::{parse_bool_option, Format};
use crate::notebook::{build_notebook, BuildOptions, Notebook};
use std::collections::HashMap;

/// Outcome of converting one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub notebook: Notebook,
    /// Whether inline expressions were found (and the Markdown kernel registered).
    pub has_inline_markdown: bool,
}

/// Convert R Markdown source text into a notebook.
pub fn convert(source: &str, options: &BuildOptions) -> Conversion {
    let lines: Vec<&str> = source.lines().collect();
    let (front_matter, body) = front_matter::extract(&lines);
    let scan = scanner::scan(body);
    let has_inline_markdown = scan.has_inline_markdown;
    Conversion {
        notebook: build_notebook(scan, front_matter, options),
        has_inline_markdown,
    }
}

/// Format implementation for R Markdown (reading only)
#[derive(Debug, Default, Clone, Copy)]
pub struct RmarkdownFormat;

impl Format for RmarkdownFormat {
    fn name(&self) -> &str {
        "rmarkdown"
    }

    fn description(&self) -> &str {
        "R Markdown with knitr chunks"
    }

    fn file_extensions(&self) -> &[&str] {
        &["Rmd", "rmd", "Rmarkdown", "rmarkdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        Ok(convert(source, &BuildOptions::default()).notebook)
    }

    /// Recognized options: `collapse-single-kernel`, `execute`.
    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<Notebook, FormatError> {
        let build = BuildOptions {
            collapse_single_kernel: parse_bool_option(options, "collapse-single-kernel", false)?,
            execute: parse_bool_option(options, "execute", false)?,
        };
        Ok(convert(source, &build).notebook)
    }
}
