//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Input formats parse source text into a [`Notebook`]; output formats serialize one.

use crate::error::FormatError;
use crate::notebook::Notebook;
use std::collections::HashMap;

/// Trait for document formats
///
/// Formats can support parsing (source → Notebook), serialization (Notebook → output), or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, nb: &Notebook) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "rmarkdown", "ipynb", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Notebook)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Notebook → output)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Notebook
    fn parse(&self, _source: &str) -> Result<Notebook, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Parse with extra parameters. Formats without parse options only accept an empty map.
    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<Notebook, FormatError> {
        if options.is_empty() {
            self.parse(source)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }

    /// Serialize a Notebook into text
    fn serialize(&self, _nb: &Notebook) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Notebook, optionally using extra parameters.
    ///
    /// Formats that take no options can rely on the default implementation, which delegates to
    /// [`Format::serialize`].
    fn serialize_with_options(
        &self,
        nb: &Notebook,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(nb)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Read a boolean format option. A present but empty value counts as `true`.
pub fn parse_bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    let Some(value) = options.get(key) else {
        return Ok(default);
    };
    if value.is_empty() {
        return Ok(true);
    }
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::NotSupported(format!(
            "Invalid boolean value '{other}' for option '{key}'"
        ))),
    }
}
