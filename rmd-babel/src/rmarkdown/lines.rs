//! Line-level predicates shared by the scanner stages.

/// A line with no visible content.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when any line of the buffer has visible content.
pub fn has_content<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| !is_blank(line.as_ref()))
}

/// Count the leading `#` characters of an ATX heading (`#+` followed by whitespace).
/// Lines reach here without their terminator, so a bare run of hashes also counts.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.len() - line.trim_start_matches('#').len();
    let rest = &line[hashes..];
    let separated = rest.is_empty() || rest.starts_with(char::is_whitespace);
    (hashes > 0 && separated).then_some(hashes)
}

/// Any Markdown heading.
pub fn is_heading(line: &str) -> bool {
    heading_level(line).is_some()
}

/// A level one or two heading: the section boundaries of a report.
pub fn is_major_heading(line: &str) -> bool {
    heading_level(line).is_some_and(|level| level <= 2)
}

/// YAML header delimiter: three or more hyphens and nothing else.
pub fn is_header_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}
