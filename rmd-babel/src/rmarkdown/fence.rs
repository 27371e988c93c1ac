//! Chunk fences and chunk options
//!
//!     An R Markdown chunk opens with a backtick fence carrying a brace tag and closes with a
//!     bare fence:
//!
//!         ```{r, echo=FALSE, fig.width=6}
//!         plot(x)
//!         ```
//!
//!     The tag holds the knitr engine name followed by the chunk options. Options are not parsed
//!     into key/value pairs: knitr accepts arbitrary R expressions there, so visibility is decided
//!     by plain substring tests, in the precedence order of [`ChunkDisplay::from_options`].

use crate::notebook::Visibility;

/// Fences are three or more backticks at the very start of the line.
fn strip_fence(line: &str) -> Option<&str> {
    let ticks = line.len() - line.trim_start_matches('`').len();
    (ticks >= 3).then(|| &line[ticks..])
}

/// A bare closing fence: three or more backticks followed by nothing but whitespace.
pub fn is_fence_close(line: &str) -> bool {
    strip_fence(line).is_some_and(|rest| rest.trim().is_empty())
}

/// The raw parts of an opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    /// Engine name exactly as written in the tag.
    pub engine: &'a str,
    /// Everything after the engine name separator up to the closing brace, untrimmed.
    /// `None` when the tag has no options or only separators.
    pub options: Option<&'a str>,
}

/// Match an opening fence: `` ```{engine} `` or `` ```{engine<sep>options} `` where `<sep>` is
/// a run of whitespace, `|` or `,` and the options run to the last `}` on the line.
pub fn parse_fence_open(line: &str) -> Option<FenceOpen<'_>> {
    let rest = strip_fence(line)?.trim_start().strip_prefix('{')?;

    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (engine, after) = rest.split_at(name_len);

    if let Some(tail) = after.strip_prefix('}') {
        return tail.trim().is_empty().then_some(FenceOpen {
            engine,
            options: None,
        });
    }

    let body = after.trim_start_matches(|c: char| c.is_whitespace() || c == '|' || c == ',');
    if body.len() == after.len() {
        return None;
    }
    let close = body.rfind('}')?;
    if !body[close + 1..].trim().is_empty() {
        return None;
    }
    let options = &body[..close];
    Some(FenceOpen {
        engine,
        options: (!options.is_empty()).then_some(options),
    })
}

/// Find an explicit `engine="name"` (or single-quoted) override inside chunk options.
pub fn engine_override(options: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(pos) = options[from..].find("engine") {
        let start = from + pos;
        if let Some(value) = quoted_engine_value(&options[start + "engine".len()..]) {
            return Some(value);
        }
        from = start + 1;
    }
    None
}

fn quoted_engine_value(rest: &str) -> Option<&str> {
    let is_quote = |c: char| c == '"' || c == '\'';
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix(is_quote)?;
    let run_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || is_quote(c)))
        .unwrap_or(rest.len());
    // The value is the longest non-empty prefix of the run that is followed by a quote.
    let close = rest[..run_len].rfind(is_quote)?;
    (close > 0).then(|| &rest[..close])
}

/// How a chunk is shown in reports, derived from its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkDisplay {
    /// `include=FALSE`: neither code nor output is shown.
    Scratch,
    /// `echo=FALSE`: only the output is shown.
    OutputOnly,
    /// Default: code and output are shown.
    Full,
    /// Only the code is shown.
    InputOnly,
}

impl ChunkDisplay {
    /// Classify chunk options. The first matching rule wins:
    ///
    /// 1. contains `include=FALSE` → [`ChunkDisplay::Scratch`]
    /// 2. contains `echo=FALSE` → [`ChunkDisplay::OutputOnly`]
    /// 3. lacks `echo=FALSE` → [`ChunkDisplay::Full`]
    /// 4. otherwise → [`ChunkDisplay::InputOnly`]
    pub fn from_options(options: &str) -> Self {
        let echo_off = options.contains("echo=FALSE");
        if options.contains("include=FALSE") {
            ChunkDisplay::Scratch
        } else if echo_off {
            ChunkDisplay::OutputOnly
        } else if !echo_off {
            ChunkDisplay::Full
        } else {
            ChunkDisplay::InputOnly
        }
    }

    pub fn visibility(self) -> Option<Visibility> {
        match self {
            ChunkDisplay::Scratch => Some(Visibility {
                output_hidden: Some(true),
                source_hidden: Some(true),
            }),
            ChunkDisplay::OutputOnly => Some(Visibility {
                output_hidden: Some(false),
                source_hidden: Some(true),
            }),
            ChunkDisplay::Full => None,
            ChunkDisplay::InputOnly => Some(Visibility {
                output_hidden: Some(true),
                source_hidden: None,
            }),
        }
    }

    /// The SoS report tag for this display mode.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            ChunkDisplay::Scratch => Some("scratch"),
            ChunkDisplay::OutputOnly => Some("report_output"),
            ChunkDisplay::Full => Some("report_cell"),
            ChunkDisplay::InputOnly => None,
        }
    }
}

/// A fully interpreted chunk header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Engine used for kernel resolution: the override when present, else the tag's engine.
    pub engine: String,
    /// Chunk options trimmed of surrounding whitespace and commas, when non-empty.
    pub options: Option<String>,
    pub display: ChunkDisplay,
}

/// Parse an opening fence line into a [`ChunkHeader`].
pub fn parse_chunk_header(line: &str) -> Option<ChunkHeader> {
    let open = parse_fence_open(line)?;
    let raw = open.options.unwrap_or("");
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == ',');
    let engine = engine_override(raw).unwrap_or(open.engine);
    Some(ChunkHeader {
        engine: engine.to_string(),
        options: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        display: ChunkDisplay::from_options(trimmed),
    })
}
