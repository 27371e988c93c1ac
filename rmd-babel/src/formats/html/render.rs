//! Rendering notebooks to HTML with `jupyter nbconvert`.

use crate::error::FormatError;
use crate::notebook::Notebook;
use crate::tools::{Tool, JUPYTER};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Settings passed through to nbconvert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// nbconvert template (`sos-report`, `sos-full`, ...). `None` leaves nbconvert's default.
    pub template: Option<String>,
    /// Ask nbconvert to execute the notebook before rendering.
    pub execute: bool,
}

/// Renders notebooks through `jupyter nbconvert --to html`.
#[derive(Debug, Clone, Copy)]
pub struct NbconvertRenderer {
    tool: Tool,
}

impl Default for NbconvertRenderer {
    fn default() -> Self {
        Self { tool: JUPYTER }
    }
}

impl NbconvertRenderer {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    /// Render `nb` into an HTML file at `output` and return the path nbconvert wrote, which
    /// gains an `.html` extension when `output` lacks one.
    ///
    /// The notebook is staged in a temporary directory that is removed when rendering
    /// finishes, whether or not nbconvert succeeded.
    pub fn render(
        &self,
        nb: &Notebook,
        output: &Path,
        settings: &RenderSettings,
    ) -> Result<PathBuf, FormatError> {
        let staging = tempdir().map_err(|e| FormatError::io(std::env::temp_dir(), e))?;
        let notebook_path = staging.path().join("__output_nb.ipynb");
        fs::write(&notebook_path, nb.to_json()?)
            .map_err(|e| FormatError::io(&notebook_path, e))?;

        let output_dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().map_err(|e| FormatError::io(".", e))?,
        };
        let output_name = output.file_name().ok_or_else(|| {
            FormatError::SerializationError(format!(
                "'{}' is not a file path",
                output.display()
            ))
        })?;

        self.tool
            .run(nbconvert_args(&notebook_path, &output_dir, output_name, settings))?;
        Ok(rendered_path(output))
    }

    /// Render `nb` and return the HTML text.
    pub fn render_to_string(
        &self,
        nb: &Notebook,
        settings: &RenderSettings,
    ) -> Result<String, FormatError> {
        let scratch = tempdir().map_err(|e| FormatError::io(std::env::temp_dir(), e))?;
        let html_path = scratch.path().join("report.html");
        self.render(nb, &html_path, settings)?;
        fs::read_to_string(&html_path).map_err(|e| FormatError::io(&html_path, e))
    }
}

fn rendered_path(output: &Path) -> PathBuf {
    if output.extension().is_some_and(|ext| ext == "html") {
        return output.to_path_buf();
    }
    let mut path = output.as_os_str().to_os_string();
    path.push(".html");
    PathBuf::from(path)
}

fn nbconvert_args(
    notebook: &Path,
    output_dir: &Path,
    output_name: &std::ffi::OsStr,
    settings: &RenderSettings,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["nbconvert".into(), "--to".into(), "html".into()];
    if let Some(template) = &settings.template {
        args.push("--template".into());
        args.push(template.into());
    }
    if settings.execute {
        args.push("--execute".into());
    }
    args.push(notebook.into());
    args.push("--output-dir".into());
    args.push(output_dir.into());
    args.push("--output".into());
    args.push(output_name.into());
    args
}
