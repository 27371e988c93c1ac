//! HTML report format
//!
//! HTML is produced by `jupyter nbconvert` from the converted notebook; this module only
//! stages the notebook and collects the result. SoS ships report templates (`sos-report`
//! shows Markdown cells and the output of cells tagged `report_output`), selected with the
//! `template` option.
//!
//! Options:
//!
//! | key        | value                 | effect                                          |
//! |------------|-----------------------|-------------------------------------------------|
//! | `template` | template name         | `--template` passed to nbconvert                |
//! | `execute`  | boolean               | `--execute` passed to nbconvert                 |
//! | `view`     | boolean               | open the rendered report in the default browser |

mod render;

pub use render::{NbconvertRenderer, RenderSettings};

use crate::error::FormatError;
use crate::format::{parse_bool_option, Format};
use crate::notebook::Notebook;
use crate::tools::open_in_viewer;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const KNOWN_OPTIONS: &[&str] = &["template", "execute", "view"];

/// Parsed HTML options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    pub render: RenderSettings,
    pub view: bool,
}

impl HtmlOptions {
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, FormatError> {
        if let Some(unknown) = options
            .keys()
            .find(|key| !KNOWN_OPTIONS.contains(&key.as_str()))
        {
            return Err(FormatError::NotSupported(format!(
                "Format 'html' does not support option '{unknown}'"
            )));
        }

        let template = options
            .get("template")
            .filter(|t| !t.is_empty())
            .cloned();
        Ok(HtmlOptions {
            render: RenderSettings {
                template,
                execute: parse_bool_option(options, "execute", false)?,
            },
            view: parse_bool_option(options, "view", false)?,
        })
    }
}

/// Format implementation for HTML reports
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat {
    renderer: NbconvertRenderer,
}

impl HtmlFormat {
    pub fn new(renderer: NbconvertRenderer) -> Self {
        Self { renderer }
    }

    /// Render `nb` to the HTML file at `output`, opening it afterwards when `view` is set.
    ///
    /// Returns the path of the report, `output` with `.html` appended if it had another
    /// extension or none.
    pub fn render_to_file(
        &self,
        nb: &Notebook,
        output: &Path,
        options: &HtmlOptions,
    ) -> Result<PathBuf, FormatError> {
        let report = self.renderer.render(nb, output, &options.render)?;
        info!("HTML report saved to {}", report.display());
        if options.view {
            open_in_viewer(&report)?;
        }
        Ok(report)
    }

    /// Render `nb` to a report that outlives this call so a browser can open it.
    pub fn render_for_viewing(
        &self,
        nb: &Notebook,
        options: &HtmlOptions,
    ) -> Result<PathBuf, FormatError> {
        self.render_to_file(nb, &kept_report_path()?, options)
    }
}

/// A fresh `.html` path in the temporary directory that is not removed on exit, so a browser
/// started in the background can still read it.
pub fn kept_report_path() -> Result<PathBuf, FormatError> {
    let report = tempfile::Builder::new()
        .prefix("rmd-report-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| FormatError::io(std::env::temp_dir(), e))?;
    let (_, path) = report
        .keep()
        .map_err(|e| FormatError::io(std::env::temp_dir(), e.error))?;
    Ok(path)
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML report rendered by jupyter nbconvert"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, nb: &Notebook) -> Result<String, FormatError> {
        self.renderer.render_to_string(nb, &RenderSettings::default())
    }

    fn serialize_with_options(
        &self,
        nb: &Notebook,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = HtmlOptions::from_options(options)?;
        if options.view {
            let path = self.render_for_viewing(nb, &options)?;
            return fs::read_to_string(&path).map_err(|e| FormatError::io(&path, e));
        }
        self.renderer.render_to_string(nb, &options.render)
    }
}
