//! Assembles scanned blocks into a notebook with its metadata envelope.

use super::{
    Cell, CodeCell, KernelSpec, LanguageInfo, MarkdownCell, Notebook, NotebookMetadata,
    SosMetadata,
};
use crate::rmarkdown::assembler::{Block, BlockKind};
use crate::rmarkdown::front_matter::FrontMatter;
use crate::rmarkdown::scanner::ScanOutput;
use serde_json::Map;

/// Knobs for the notebook envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Write a plain R notebook instead of a SoS one when the document only uses R.
    pub collapse_single_kernel: bool,
    /// The notebook is about to be executed. Execution goes through SoS, so this disables the
    /// single-kernel collapse.
    pub execute: bool,
}

/// Build the final notebook from a finished scan and the document header.
pub fn build_notebook(
    scan: ScanOutput,
    front_matter: Option<FrontMatter>,
    options: &BuildOptions,
) -> Notebook {
    let collapse = options.collapse_single_kernel
        && !options.execute
        && !scan.has_inline_markdown
        && scan.kernels.is_sos_or_r_only();

    let cells = scan.blocks.into_iter().map(block_to_cell).collect();
    let mut metadata = if collapse {
        r_metadata()
    } else {
        sos_metadata(SosMetadata {
            kernels: scan.kernels.into_entries(),
            extra: Map::new(),
        })
    };
    metadata.front_matter = front_matter;
    Notebook::new(cells, metadata)
}

fn block_to_cell(block: Block) -> Cell {
    match block.kind {
        BlockKind::Code => Cell::Code(CodeCell {
            execution_count: block.sequence,
            id: None,
            metadata: block.metadata,
            outputs: Vec::new(),
            source: block.content,
        }),
        BlockKind::Prose => Cell::Markdown(MarkdownCell {
            id: None,
            metadata: block.metadata,
            source: block.content,
        }),
    }
}

fn sos_metadata(sos: SosMetadata) -> NotebookMetadata {
    NotebookMetadata {
        front_matter: None,
        kernelspec: KernelSpec {
            display_name: "SoS".to_string(),
            language: "sos".to_string(),
            name: "sos".to_string(),
        },
        language_info: LanguageInfo {
            codemirror_mode: None,
            file_extension: ".sos".to_string(),
            mimetype: "text/x-sos".to_string(),
            name: "sos".to_string(),
            nbconvert_exporter: Some("sos_notebook.converter.SoS_Exporter".to_string()),
            pygments_lexer: Some("python".to_string()),
            version: None,
            extra: Map::new(),
        },
        sos: Some(sos),
        extra: Map::new(),
    }
}

fn r_metadata() -> NotebookMetadata {
    NotebookMetadata {
        front_matter: None,
        kernelspec: KernelSpec {
            display_name: "R".to_string(),
            language: "R".to_string(),
            name: "ir".to_string(),
        },
        language_info: LanguageInfo {
            codemirror_mode: Some("r".into()),
            file_extension: ".r".to_string(),
            mimetype: "text/x-r-source".to_string(),
            name: "R".to_string(),
            nbconvert_exporter: None,
            pygments_lexer: Some("r".to_string()),
            version: Some("3.6.3".to_string()),
            extra: Map::new(),
        },
        sos: None,
        extra: Map::new(),
    }
}
