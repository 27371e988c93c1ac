//! Turns finished line buffers into blocks.

use super::engines::MARKDOWN_KERNEL;
use super::inline::EXPAND_MAGIC;
use super::lines::has_content;
use crate::notebook::CellMetadata;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Code,
    Prose,
}

impl BlockKind {
    /// Resolve a cell type name as used by nbformat (`code`, `markdown`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "code" => Some(BlockKind::Code),
            "markdown" | "prose" => Some(BlockKind::Prose),
            _ => None,
        }
    }
}

/// A finished unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Buffer lines joined by newlines, surrounding whitespace removed.
    pub content: String,
    pub metadata: CellMetadata,
    /// Execution count, 1-based, for code blocks.
    pub sequence: Option<u32>,
}

/// Collects blocks in document order and numbers the executable ones.
#[derive(Debug, Clone)]
pub struct Assembler {
    blocks: Vec<Block>,
    next_sequence: u32,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            blocks: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Emit a code block. Emitted even when its lines are blank; only a chunk with no lines at
    /// all is dropped.
    pub fn push_code<S: AsRef<str>>(&mut self, lines: &[S], metadata: CellMetadata) {
        if lines.is_empty() {
            return;
        }
        let content = join(lines);
        self.push_numbered(content, metadata);
    }

    /// Emit a prose block. Whitespace-only prose is dropped. Prose owned by the Markdown kernel
    /// holds inline expressions and becomes an executable `%expand` block.
    pub fn push_prose<S: AsRef<str>>(&mut self, lines: &[S], metadata: CellMetadata) {
        if !has_content(lines) {
            return;
        }
        let content = join(lines);
        if metadata.kernel.as_deref() == Some(MARKDOWN_KERNEL.0) {
            self.push_numbered(format!("{EXPAND_MAGIC}\n{content}"), metadata);
        } else {
            self.blocks.push(Block {
                kind: BlockKind::Prose,
                content,
                metadata,
                sequence: None,
            });
        }
    }

    /// Emit a block by cell type name. Unknown names are treated as code.
    pub fn push_named<S: AsRef<str>>(&mut self, kind: &str, lines: &[S], metadata: CellMetadata) {
        match BlockKind::from_name(kind) {
            Some(BlockKind::Prose) => self.push_prose(lines, metadata),
            Some(BlockKind::Code) => self.push_code(lines, metadata),
            None => {
                warn!("Unrecognized cell type {kind}, code assumed.");
                self.push_code(lines, metadata);
            }
        }
    }

    fn push_numbered(&mut self, content: String, metadata: CellMetadata) {
        self.blocks.push(Block {
            kind: BlockKind::Code,
            content,
            metadata,
            sequence: Some(self.next_sequence),
        });
        self.next_sequence += 1;
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn join<S: AsRef<str>>(lines: &[S]) -> String {
    let joined: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    joined.join("\n").trim().to_string()
}
