//! Locating and running the external Jupyter tools.
//!
//! Execution and HTML rendering are delegated to `papermill` and `jupyter nbconvert`. Each tool
//! is looked up from an override environment variable first, then on `PATH`.

use crate::error::FormatError;
use log::debug;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

/// An external program the converter can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Name used in error messages.
    pub name: &'static str,
    /// Environment variable that overrides the lookup.
    pub env_var: &'static str,
    /// Executable names tried on `PATH`, in order.
    pub candidates: &'static [&'static str],
}

pub const PAPERMILL: Tool = Tool {
    name: "papermill",
    env_var: "RMD_PAPERMILL_BIN",
    candidates: &["papermill"],
};

pub const JUPYTER: Tool = Tool {
    name: "jupyter",
    env_var: "RMD_JUPYTER_BIN",
    candidates: &["jupyter"],
};

impl Tool {
    /// Resolve the executable for this tool.
    pub fn resolve(&self) -> Result<PathBuf, FormatError> {
        if let Some(path) = env::var_os(self.env_var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        for candidate in self.candidates {
            if let Ok(path) = which(candidate) {
                return Ok(path);
            }
        }

        Err(FormatError::collaborator(
            self.name,
            format!(
                "unable to locate the '{}' executable. Install it or set {} to override the detection.",
                self.name, self.env_var
            ),
        ))
    }

    /// Run the tool with `args` and wait for it; a non-zero exit is an error.
    pub fn run<I, S>(&self, args: I) -> Result<(), FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = self.resolve()?;
        let mut command = Command::new(&program);
        command.args(args);
        debug!("running {command:?}");

        let output = command.output().map_err(|e| {
            FormatError::collaborator(
                self.name,
                format!("failed to launch ({}): {e}", program.display()),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::collaborator(
                self.name,
                format!("exited with status {}: {}", output.status, stderr.trim()),
            ));
        }
        Ok(())
    }
}

/// Environment variable naming the program that opens rendered reports.
pub const VIEWER_ENV_VAR: &str = "RMD_VIEWER_BIN";

/// Open `path` with the platform's default application, or with `RMD_VIEWER_BIN` when set.
pub fn open_in_viewer(path: &Path) -> Result<(), FormatError> {
    let mut command = match env::var_os(VIEWER_ENV_VAR).filter(|viewer| !viewer.is_empty()) {
        Some(viewer) => Command::new(viewer),
        None => platform_opener(),
    };
    command.arg(path);
    debug!("opening viewer: {command:?}");

    let status = command
        .status()
        .map_err(|e| FormatError::collaborator("viewer", e.to_string()))?;
    if !status.success() {
        return Err(FormatError::collaborator(
            "viewer",
            format!("exited with status {status}"),
        ));
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn platform_opener() -> Command {
    let mut command = Command::new("cmd");
    command.args([OsStr::new("/C"), OsStr::new("start"), OsStr::new("")]);
    command
}

#[cfg(target_os = "macos")]
fn platform_opener() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_opener() -> Command {
    Command::new("xdg-open")
}
