//! Line-scanning state machine
//!
//!     The scanner makes a single forward pass over the document body. It is always in one of two
//!     states:
//!
//!         Prose ──(chunk fence open)──▶ Code
//!         Code  ──(bare fence)────────▶ Prose
//!
//!     Lines are accumulated into a pending buffer together with the metadata the next block will
//!     carry. Every transition, and a few boundaries inside prose, hand the buffer to the
//!     [`Assembler`] and start a fresh one. [`Scanner::finish`] is the end-of-input transition: it
//!     flushes whatever is pending, including the body of a chunk whose closing fence is missing.
//!
//!     Prose boundaries, checked in this order before a prose line is buffered:
//!
//!     1. the line holds an inline expression: the expression's paragraph is moved into a block of
//!        its own, run by the Markdown kernel (see `inline.rs`);
//!     2. the line is a heading and the buffer has content, or the last buffered line is a level
//!        one or two heading: the buffer is emitted first. The second rule also separates a major
//!        heading from the paragraph right below it.

use super::assembler::{Assembler, Block};
use super::engines::KernelRegistry;
use super::fence::{is_fence_close, parse_chunk_header, ChunkHeader};
use super::inline::{expansion_metadata, has_inline_span, split_point};
use super::lines::{has_content, is_heading, is_major_heading};
use crate::notebook::CellMetadata;
use log::debug;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Prose,
    Code,
}

/// Everything a scan produces.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub blocks: Vec<Block>,
    pub kernels: KernelRegistry,
    /// Whether any inline expression was relocated.
    pub has_inline_markdown: bool,
}

#[derive(Debug)]
pub struct Scanner {
    state: State,
    buffer: Vec<String>,
    metadata: CellMetadata,
    kernels: KernelRegistry,
    assembler: Assembler,
    has_inline_markdown: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner {
            state: State::Prose,
            buffer: Vec::new(),
            metadata: CellMetadata::default(),
            kernels: KernelRegistry::new(),
            assembler: Assembler::new(),
            has_inline_markdown: false,
        }
    }

    /// Consume one line (without its terminator).
    pub fn feed(&mut self, line: &str) {
        match self.state {
            State::Prose => self.feed_prose(line),
            State::Code => self.feed_code(line),
        }
    }

    fn feed_prose(&mut self, line: &str) {
        if let Some(header) = parse_chunk_header(line) {
            self.open_chunk(header);
            return;
        }

        if has_inline_span(line) {
            self.relocate_inline();
        }

        let after_major_heading = self
            .buffer
            .last()
            .is_some_and(|last| is_major_heading(last));
        if (is_heading(line) && has_content(&self.buffer)) || after_major_heading {
            self.flush_prose();
        }

        self.buffer.push(line.trim_end().to_string());
    }

    fn feed_code(&mut self, line: &str) {
        if is_fence_close(line) {
            self.close_chunk();
        } else {
            self.buffer.push(line.trim_end().to_string());
        }
    }

    fn open_chunk(&mut self, header: ChunkHeader) {
        if has_content(&self.buffer) {
            self.flush_prose();
        }
        self.buffer.clear();

        debug!("chunk opens: engine={}", header.engine);
        self.state = State::Code;
        self.metadata = CellMetadata {
            kernel: Some(self.kernels.use_engine(&header.engine)),
            chunk_options: header.options,
            visibility: header.display.visibility(),
            tags: header.display.tag().map(str::to_string).into_iter().collect(),
            ..CellMetadata::default()
        };
    }

    fn close_chunk(&mut self) {
        self.state = State::Prose;
        let metadata = mem::take(&mut self.metadata);
        self.assembler.push_code(&self.buffer, metadata);
        self.buffer.clear();
    }

    fn flush_prose(&mut self) {
        let metadata = mem::take(&mut self.metadata);
        self.assembler.push_prose(&self.buffer, metadata);
        self.buffer.clear();
    }

    /// Start a Markdown-kernel block for an inline expression, first emitting the complete
    /// paragraphs buffered before it.
    fn relocate_inline(&mut self) {
        if self.metadata.kernel.is_none() && has_content(&self.buffer) {
            if let Some(at) = split_point(&self.buffer) {
                let tail = self.buffer.split_off(at);
                let head = mem::replace(&mut self.buffer, tail);
                let metadata = mem::take(&mut self.metadata);
                self.assembler.push_prose(&head, metadata);
            }
        }
        self.has_inline_markdown = true;
        self.metadata = expansion_metadata();
    }

    /// End of input: emit what is pending and close the kernel list.
    pub fn finish(mut self) -> ScanOutput {
        if has_content(&self.buffer) {
            let metadata = mem::take(&mut self.metadata);
            match self.state {
                State::Code => {
                    debug!("input ended inside a chunk; keeping its body as a code cell");
                    self.assembler.push_code(&self.buffer, metadata);
                }
                State::Prose => self.assembler.push_prose(&self.buffer, metadata),
            }
        }
        if self.has_inline_markdown {
            self.kernels.push_markdown();
        }
        ScanOutput {
            blocks: self.assembler.into_blocks(),
            kernels: self.kernels,
            has_inline_markdown: self.has_inline_markdown,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a whole body.
pub fn scan<'a>(lines: impl IntoIterator<Item = &'a str>) -> ScanOutput {
    let mut scanner = Scanner::new();
    for line in lines {
        scanner.feed(line);
    }
    scanner.finish()
}
