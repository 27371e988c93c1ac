//! Jupyter notebook model (nbformat v4) as produced for the SoS kernel
//!
//!     The converter's output is a notebook: an ordered list of cells plus a metadata envelope.
//!     Only the parts of nbformat the converter writes are modelled with closed types; cell
//!     outputs are carried as opaque JSON so executed notebooks read back without loss.
//!
//!     Metadata the converter does not know about (papermill's bookkeeping, SoS panel state,
//!     execution timings) is kept in flattened `extra` maps, so a notebook read back after
//!     execution serializes again without losing it.
//!
//!     Serialization follows what `nbformat.write` produces: one-space indentation, keys in
//!     sorted order and multi-line strings written as arrays of lines. Keys are sorted by going
//!     through `serde_json::Value`, whose maps are ordered.

pub mod builder;

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use builder::{build_notebook, BuildOptions};

pub const NBFORMAT: u32 = 4;
pub const NBFORMAT_MINOR: u32 = 4;

/// A complete notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>, metadata: NotebookMetadata) -> Self {
        Notebook {
            cells,
            metadata,
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    /// Serialize to nbformat JSON, terminated by a newline.
    pub fn to_json(&self) -> Result<String, FormatError> {
        let value = serde_json::to_value(self)?;
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        out.push(b'\n');
        String::from_utf8(out).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    pub fn code_cells(&self) -> impl Iterator<Item = &CodeCell> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Code(code) => Some(code),
            Cell::Markdown(_) => None,
        })
    }

    pub fn markdown_cells(&self) -> impl Iterator<Item = &MarkdownCell> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Markdown(md) => Some(md),
            Cell::Code(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Code(CodeCell),
    Markdown(MarkdownCell),
}

impl Cell {
    pub fn source(&self) -> &str {
        match self {
            Cell::Code(code) => &code.source,
            Cell::Markdown(md) => &md.source,
        }
    }

    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Cell::Code(code) => &code.metadata,
            Cell::Markdown(md) => &md.metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    pub execution_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub metadata: CellMetadata,
    #[serde(default)]
    pub outputs: Vec<Value>,
    #[serde(with = "multiline")]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub metadata: CellMetadata,
    #[serde(with = "multiline")]
    pub source: String,
}

/// Per-cell metadata understood by SoS Notebook and its report templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetadata {
    /// The chunk options exactly as written after the engine name.
    #[serde(
        rename = "Rmd_chunk_options",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub chunk_options: Option<String>,
    #[serde(rename = "jupyter", default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// SoS subkernel the cell runs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CellMetadata {
    pub fn is_empty(&self) -> bool {
        self == &CellMetadata::default()
    }
}

/// JupyterLab's `jupyter` metadata block controlling collapsed input/output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hidden: Option<bool>,
}

/// One entry of the SoS kernel list: `[name, kernel, language, color, codemirror mode]`.
///
/// The converter only fills the first two slots and leaves language module and color empty so
/// SoS resolves them from the installed kernel. Notebooks executed by SoS come back with the
/// remaining slots filled in (the codemirror mode is often an object); they are kept verbatim
/// in `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct KernelEntry {
    pub display_name: String,
    pub name: String,
    pub details: Vec<Value>,
}

impl KernelEntry {
    pub fn new(display_name: impl Into<String>, name: impl Into<String>) -> Self {
        KernelEntry {
            display_name: display_name.into(),
            name: name.into(),
            details: vec![Value::from(""), Value::from("")],
        }
    }
}

impl TryFrom<Vec<Value>> for KernelEntry {
    type Error = String;

    fn try_from(fields: Vec<Value>) -> Result<Self, Self::Error> {
        let mut fields = fields.into_iter();
        let mut text = |slot: &str| match fields.next() {
            Some(Value::String(text)) => Ok(text),
            other => Err(format!("kernel entry {slot} must be a string, found {other:?}")),
        };
        let display_name = text("name")?;
        let name = text("kernel")?;
        Ok(KernelEntry {
            display_name,
            name,
            details: fields.collect(),
        })
    }
}

impl From<KernelEntry> for Vec<Value> {
    fn from(entry: KernelEntry) -> Self {
        let mut fields = vec![Value::String(entry.display_name), Value::String(entry.name)];
        fields.extend(entry.details);
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    /// The document's YAML header, carried over verbatim.
    #[serde(
        rename = "Rmd_chunk_options",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub front_matter: Option<Map<String, Value>>,
    pub kernelspec: KernelSpec,
    pub language_info: LanguageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sos: Option<SosMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// A mode name, or an object such as `{"name": "ipython", "version": 3}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codemirror_mode: Option<Value>,
    pub file_extension: String,
    pub mimetype: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbconvert_exporter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pygments_lexer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosMetadata {
    pub kernels: Vec<KernelEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// nbformat stores multi-line strings as arrays of lines but accepts plain strings on read.
mod multiline {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(text.split_inclusive('\n'))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Joined(String),
        Lines(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Text::deserialize(deserializer)? {
            Text::Joined(text) => text,
            Text::Lines(lines) => lines.concat(),
        })
    }
}
