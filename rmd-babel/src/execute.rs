//! Notebook execution through `papermill --engine sos`.

use crate::error::FormatError;
use crate::notebook::Notebook;
#[cfg(feature = "native-export")]
use crate::tools::{Tool, PAPERMILL};
#[cfg(feature = "native-export")]
use log::info;
#[cfg(feature = "native-export")]
use std::ffi::OsStr;
#[cfg(feature = "native-export")]
use std::fs;
use std::path::{Path, PathBuf};

/// Where an executed notebook ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Executed {
    /// No output path was given; the executed notebook is returned.
    InMemory(Notebook),
    /// The executed notebook was written to this path.
    Written(PathBuf),
}

/// Runs a notebook and collects its outputs.
pub trait Executor {
    /// Execute `nb`. With `output`, the executed notebook is written there; otherwise it is
    /// read back and returned.
    fn execute(&self, nb: &Notebook, output: Option<&Path>) -> Result<Executed, FormatError>;
}

/// Executes notebooks with papermill using the SoS engine.
#[cfg(feature = "native-export")]
#[derive(Debug, Clone, Copy)]
pub struct PapermillExecutor {
    tool: Tool,
}

#[cfg(feature = "native-export")]
impl Default for PapermillExecutor {
    fn default() -> Self {
        Self { tool: PAPERMILL }
    }
}

#[cfg(feature = "native-export")]
impl PapermillExecutor {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }
}

#[cfg(feature = "native-export")]
impl Executor for PapermillExecutor {
    fn execute(&self, nb: &Notebook, output: Option<&Path>) -> Result<Executed, FormatError> {
        let staging = tempfile::tempdir().map_err(|e| FormatError::io(std::env::temp_dir(), e))?;
        let input = staging.path().join("__input_nb.ipynb");
        fs::write(&input, nb.to_json()?).map_err(|e| FormatError::io(&input, e))?;

        let target = match output {
            Some(path) => path.to_path_buf(),
            None => staging.path().join("__output_nb.ipynb"),
        };

        self.tool.run([
            OsStr::new("--engine"),
            OsStr::new("sos"),
            input.as_os_str(),
            target.as_os_str(),
        ])?;

        match output {
            Some(path) => {
                info!("Jupyter notebook saved to {}", path.display());
                Ok(Executed::Written(path.to_path_buf()))
            }
            None => {
                let text =
                    fs::read_to_string(&target).map_err(|e| FormatError::io(&target, e))?;
                Notebook::from_json(&text).map(Executed::InMemory)
            }
        }
    }
}
