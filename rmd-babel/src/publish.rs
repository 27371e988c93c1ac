//! Document publishing pipeline.
//!
//! Provides a high-level API for turning converted notebooks into output files. This module
//! bridges the gap between the format registry, the executor and file I/O, handling both
//! in-memory and file-based output.
//!
//! Two entry points:
//! - [`publish`]: serialize an already converted notebook.
//! - [`convert_file`]: the whole `.Rmd` → notebook/report pipeline behind `rmd convert`.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::execute::{Executed, Executor};
use crate::notebook::{BuildOptions, Notebook};
use crate::registry::FormatRegistry;
use crate::rmarkdown;
use crate::source::read_source;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Format used when neither `--to` nor the output extension names one.
pub const DEFAULT_TARGET: &str = "ipynb";

/// Specifies how to publish a notebook.
///
/// Use the builder pattern to configure the publication:
///
/// ```ignore
/// let spec = PublishSpec::new(&notebook, "html")
///     .with_output_path("report.html")
///     .with_option("template", "sos-report");
/// ```
///
/// If no output path is provided, the serialized content is returned in memory.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The converted notebook.
    pub notebook: &'a Notebook,
    /// Target format name (e.g., "ipynb", "html").
    pub format: &'a str,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., template).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(notebook: &'a Notebook, format: &'a str) -> Self {
        Self {
            notebook,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (when no output path was specified).
    InMemory(String),
    /// Path to the written file (when output path was specified).
    File(PathBuf),
    /// Report rendered to a temporary file and opened in the browser.
    Viewed(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Publishes a notebook with the default format registry.
///
/// # Errors
///
/// Returns [`FormatError`] if:
/// - The format is not supported
/// - Serialization fails
/// - File I/O fails
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    publish_with(&FormatRegistry::with_defaults(), spec)
}

/// Publishes a notebook using the formats of `registry`.
pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    let text = registry.serialize_with_options(spec.notebook, spec.format, &spec.options)?;
    write_or_return_text(text, spec.output)
}

fn write_or_return_text(
    text: String,
    output: Option<PathBuf>,
) -> Result<PublishResult, FormatError> {
    if let Some(path) = output {
        write_to_path(path, &text).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        })
    } else {
        Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        })
    }
}

fn write_to_path(path: PathBuf, text: &str) -> Result<PathBuf, FormatError> {
    fs::write(&path, text).map_err(|err| FormatError::io(&path, err))?;
    Ok(path)
}

/// One `.Rmd` conversion, as requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Target format; detected from `output` and then [`DEFAULT_TARGET`] when unset.
    pub to: Option<String>,
    /// Execute the notebook before writing it (or before rendering the report).
    pub execute: bool,
    pub collapse_single_kernel: bool,
    /// HTML template name.
    pub template: Option<String>,
    /// Open the HTML report in a browser.
    pub view: bool,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Resolve the target format name.
    pub fn target(&self, registry: &FormatRegistry) -> String {
        if let Some(to) = &self.to {
            return to.clone();
        }
        self.output
            .as_deref()
            .and_then(|path| path.to_str())
            .and_then(|name| registry.detect_format_from_filename(name))
            .filter(|name| {
                registry
                    .get(name)
                    .map(|f| f.supports_serialization())
                    .unwrap_or(false)
            })
            .unwrap_or_else(|| DEFAULT_TARGET.to_string())
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            collapse_single_kernel: self.collapse_single_kernel,
            execute: self.execute,
        }
    }
}

/// Run a conversion with the default formats and papermill.
#[cfg(feature = "native-export")]
pub fn convert_file(request: &ConvertRequest) -> Result<PublishResult, FormatError> {
    convert_file_with(
        request,
        &FormatRegistry::with_defaults(),
        &crate::execute::PapermillExecutor::default(),
    )
}

/// Run a conversion: read, convert, optionally execute, then publish.
///
/// When the target is a notebook file and execution is requested, the executor writes the
/// output directly. For reports, the notebook is executed first and rendered without a second
/// execution.
pub fn convert_file_with(
    request: &ConvertRequest,
    registry: &FormatRegistry,
    executor: &dyn Executor,
) -> Result<PublishResult, FormatError> {
    let target = request.target(registry);
    // Fail on an unknown target before spending time on execution.
    registry.get(&target)?;

    let source = read_source(&request.input)?;
    let mut notebook = rmarkdown::convert(&source, &request.build_options()).notebook;

    if request.execute {
        let direct_output = if target == DEFAULT_TARGET {
            request.output.as_deref()
        } else {
            None
        };
        match executor.execute(&notebook, direct_output)? {
            Executed::Written(path) => {
                return Ok(PublishResult {
                    artifact: PublishArtifact::File(path),
                })
            }
            Executed::InMemory(executed) => notebook = executed,
        }
    }

    if target == "html" {
        return publish_report(request, registry, &notebook);
    }

    let mut spec = PublishSpec::new(&notebook, &target);
    if let Some(output) = &request.output {
        spec = spec.with_output_path(output);
    }
    let result = publish_with(registry, spec)?;
    if let PublishArtifact::File(path) = &result.artifact {
        info!("Jupyter notebook saved to {}", path.display());
    }
    Ok(result)
}

fn publish_report(
    request: &ConvertRequest,
    registry: &FormatRegistry,
    notebook: &Notebook,
) -> Result<PublishResult, FormatError> {
    let mut spec = PublishSpec::new(notebook, "html");
    if let Some(template) = &request.template {
        spec = spec.with_option("template", template.clone());
    }
    // Execution already happened above; the renderer never executes again.
    spec = spec.with_option("execute", "false");

    #[cfg(feature = "native-export")]
    if request.view {
        return view_report(request, registry, spec);
    }
    #[cfg(not(feature = "native-export"))]
    if request.view {
        return Err(FormatError::NotSupported(
            "viewing reports requires the native-export feature".to_string(),
        ));
    }

    if let Some(output) = &request.output {
        spec = spec.with_output_path(output);
    }
    publish_with(registry, spec)
}

/// Render the report with the registry's `html` format and open it. Without an output path
/// the report goes to a temporary file that outlives the process.
#[cfg(feature = "native-export")]
fn view_report(
    request: &ConvertRequest,
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    use crate::formats::html::kept_report_path;
    use crate::tools::open_in_viewer;

    let html = registry.serialize_with_options(spec.notebook, spec.format, &spec.options)?;
    let path = match &request.output {
        Some(output) => output.clone(),
        None => kept_report_path()?,
    };
    let path = write_to_path(path, &html)?;
    info!("HTML report saved to {}", path.display());
    open_in_viewer(&path)?;

    let artifact = match request.output {
        Some(_) => PublishArtifact::File(path),
        None => PublishArtifact::Viewed(path),
    };
    Ok(PublishResult { artifact })
}
