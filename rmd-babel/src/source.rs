//! Reading R Markdown input files.

use crate::error::FormatError;
use log::warn;
use std::fs;
use std::path::Path;

/// Read `path` as text. Invalid UTF-8 sequences are dropped with a warning.
pub fn read_source(path: &Path) -> Result<String, FormatError> {
    let bytes = fs::read(path).map_err(|e| FormatError::io(path, e))?;
    Ok(decode_lossy(&bytes))
}

/// Decode `bytes`, dropping (not replacing) invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("Ignoring non-UTF8 characters from input Rmd file.");
            bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
        }
    }
}
