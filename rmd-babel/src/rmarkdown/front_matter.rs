//! YAML header extraction
//!
//! R Markdown documents start with a YAML block between two `---` lines. The block is parsed
//! into a JSON map and removed from the line stream. Only the first two delimiter lines of the
//! document are considered, and a header that fails to parse is dropped with a warning rather
//! than failing the conversion.

use super::lines::is_header_delimiter;
use log::warn;
use serde_json::{Map, Value};

/// Parsed header fields, in the open-ended shape the author wrote them.
pub type FrontMatter = Map<String, Value>;

/// Split the header off `lines`.
///
/// Returns the parsed header, if any, and the remaining body lines. When two delimiters enclose
/// at least one line, the delimiters and everything between them are removed whether or not the
/// YAML parses.
pub fn extract<'a>(lines: &[&'a str]) -> (Option<FrontMatter>, Vec<&'a str>) {
    let mut delimiters = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_header_delimiter(line))
        .map(|(index, _)| index);

    let (Some(open), Some(close)) = (delimiters.next(), delimiters.next()) else {
        return (None, lines.to_vec());
    };
    if close - open <= 1 {
        return (None, lines.to_vec());
    }

    let header = parse_header(&lines[open + 1..close].join("\n"));
    let body = lines[..open]
        .iter()
        .chain(&lines[close + 1..])
        .copied()
        .collect();
    (header, body)
}

fn parse_header(yaml: &str) -> Option<FrontMatter> {
    // Parsing straight into JSON values keeps dates and times as the strings the author wrote.
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(Value::Object(_)) | Ok(Value::Null) => None,
        Ok(other) => {
            warn!("Document metadata block is not a mapping (found {other}), ignoring it");
            None
        }
        Err(err) => {
            warn!("Error reading document metadata block: {err}");
            warn!("Trying to continue without header");
            None
        }
    }
}
