//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name, or detected from a file extension.

use crate::error::FormatError;
use crate::format::Format;
use crate::notebook::Notebook;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let nb = registry.parse(source, "rmarkdown")?;
/// let json = registry.serialize(&nb, "ipynb")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        // Formats are scanned in name order so detection does not depend on hash order.
        self.list_formats().into_iter().find(|name| {
            self.formats[name]
                .file_extensions()
                .contains(&extension)
        })
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Notebook, FormatError> {
        self.parse_with_options(source, format, &HashMap::new())
    }

    /// Parse source text using the specified format and options
    pub fn parse_with_options(
        &self,
        source: &str,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<Notebook, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse_with_options(source, options)
    }

    /// Serialize a notebook using the specified format
    pub fn serialize(&self, nb: &Notebook, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(nb, format, &HashMap::new())
    }

    /// Serialize a notebook using the specified format and options
    pub fn serialize_with_options(
        &self,
        nb: &Notebook,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(nb, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::rmarkdown::RmarkdownFormat);
        registry.register(crate::formats::ipynb::IpynbFormat);
        #[cfg(feature = "native-export")]
        registry.register(crate::formats::html::HtmlFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
