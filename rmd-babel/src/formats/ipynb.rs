//! Jupyter notebook format
//!
//! Writes notebooks the way `nbformat.write` does (see the notebook module) and reads them
//! back, which is how executed notebooks return from papermill.

use crate::error::FormatError;
use crate::format::Format;
use crate::notebook::Notebook;

/// Format implementation for `.ipynb` files
#[derive(Debug, Default, Clone, Copy)]
pub struct IpynbFormat;

impl Format for IpynbFormat {
    fn name(&self) -> &str {
        "ipynb"
    }

    fn description(&self) -> &str {
        "Jupyter notebook (nbformat 4) for the SoS kernel"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ipynb"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        Notebook::from_json(source)
    }

    fn serialize(&self, nb: &Notebook) -> Result<String, FormatError> {
        nb.to_json()
    }
}
