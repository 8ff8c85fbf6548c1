//! Module body markup: `**bold**` spans and line breaks.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichSegment {
    /// Text of the run
    pub text: String,
    /// Whether the run is bold
    pub bold: bool,
}

impl RichSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// One display line.
pub type RichLine = Vec<RichSegment>;

/// Split module content into styled lines.
///
/// Every `\n` starts a new line. Inside a line, `**text**` becomes a bold
/// segment; an unmatched `**` is kept as plain text.
///
/// # Examples
///
/// ```
/// use curso_wizard::render_rich_text;
///
/// let lines = render_rich_text("Las **legumbres** son clave.\nFin");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].len(), 3);
/// assert!(lines[0][1].bold);
/// assert_eq!(lines[0][1].text, "legumbres");
/// ```
pub fn render_rich_text(content: &str) -> Vec<RichLine> {
    content.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> RichLine {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(RichSegment::plain(&line[last..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            segments.push(RichSegment::bold(inner.as_str()));
        }
        last = whole.end();
    }
    if last < line.len() {
        segments.push(RichSegment::plain(&line[last..]));
    }
    segments
}
