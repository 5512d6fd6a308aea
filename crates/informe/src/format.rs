//! Heuristic XML pretty-printer.
//!
//! Re-flows a flat (or loosely wrapped) XML document into one tag per line
//! with 4-space indent units. Lines are classified by surface pattern into
//! four kinds and the indent delta between consecutive lines comes from a
//! fixed 4x4 transition table. This is deliberately not a parser: it
//! accepts arbitrary, even malformed, input and never fails — unbalanced
//! tags just produce odd indentation.

use regex::Regex;

/// Surface classification of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Self-contained: a self-closing tag, or a complete element on one line
    Single,
    /// A closing tag
    Closing,
    /// An opening tag (not a comment, doctype, or XML declaration)
    Opening,
    /// Anything else: bare text, comments, declarations
    Other,
}

impl LineKind {
    const fn index(self) -> usize {
        match self {
            Self::Single => 0,
            Self::Closing => 1,
            Self::Opening => 2,
            Self::Other => 3,
        }
    }
}

/// Indent deltas for every (previous kind, current kind) pair.
/// Rows are the previous line's kind, columns the current line's, in
/// single/closing/opening/other order. The delta applies to the current
/// line, before it is rendered.
const TRANSITIONS: [[i32; 4]; 4] = [
    //  single closing opening other
    [0, -1, 0, 0], // single
    [0, -1, 0, 0], // closing
    [1, 0, 1, 1],  // opening
    [0, -1, 0, 0], // other
];

/// Re-indent an XML document, one tag or text node per line
///
/// Total over arbitrary input. Re-running on its own output reproduces
/// the same line structure.
#[must_use]
pub fn pretty_print(xml: &str) -> String {
    let normalized = normalize(xml);

    let single_tag = Regex::new(r"<[^>]+/>").unwrap();
    let paired_tag = Regex::new(r"<[^/!?][^>]*>.*</[^>]+>").unwrap();
    let closing_tag = Regex::new(r"</[^>]+>").unwrap();
    let opening_tag = Regex::new(r"<[^!?].*>").unwrap();
    let classify = |line: &str| -> LineKind {
        if single_tag.is_match(line) || paired_tag.is_match(line) {
            LineKind::Single
        } else if closing_tag.is_match(line) {
            LineKind::Closing
        } else if opening_tag.is_match(line) {
            LineKind::Opening
        } else {
            LineKind::Other
        }
    };

    let mut out = String::new();
    let mut indent: i32 = 0;
    let mut prev = LineKind::Other;
    for raw in normalized.lines() {
        let line = raw.trim();
        let kind = classify(line);
        indent += TRANSITIONS[prev.index()][kind.index()];
        prev = kind;
        if !line.is_empty() {
            // the level may go negative on unbalanced input; clamp at render
            for _ in 0..indent.max(0) {
                out.push_str("    ");
            }
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// First pass: force one tag per line.
///
/// Breaks every `><` boundary, strips trailing whitespace, then moves text
/// that trails a tag at the end of a line onto its own line. Text followed
/// by another tag on the same line (a complete `<a>text</a>` element) is
/// left alone.
fn normalize(xml: &str) -> String {
    let boundary = Regex::new(r"><").unwrap();
    let trailing_ws = Regex::new(r"(?m)[ \t]+$").unwrap();
    let glued_text = Regex::new(r"(?m)(<[^>]+>)([^<\n]+)$").unwrap();
    let broken = boundary.replace_all(xml, ">\n<");
    let stripped = trailing_ws.replace_all(&broken, "");
    let split = glued_text.replace_all(&stripped, "$1\n$2");
    split.trim_end().to_string()
}
