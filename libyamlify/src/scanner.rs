//! Phase 1: Scanner
//!
//! The scanner converts raw source text into scan lines. It performs:
//! - Blank line removal
//! - Indentation counting (spaces only, tabs are rejected)
//! - Sequence marker extraction (the "-" prefix)
//! - Trailing whitespace trimming
//! - Removal of a leading byte order mark

use crate::error::{ParseContext, Result};

/// A single non-blank line after the scanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    /// Content after indent and leader, trimmed.
    pub line: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// Whether the line starts with a "-" sequence marker.
    pub item: bool,
    /// Column where `line` starts.
    pub col: usize,
    /// Zero-based line number for error reporting.
    pub line_num: usize,
}

impl ScanLine {
    /// Classify text that starts at column `indent`.
    fn classify(rest: &str, indent: usize, line_num: usize) -> Self {
        if let Some(after) = strip_leader(rest) {
            let lead = after.len() - after.trim_start().len();
            return ScanLine {
                line: after.trim().to_string(),
                indent,
                item: true,
                col: indent + 1 + lead,
                line_num,
            };
        }
        ScanLine {
            line: rest.to_string(),
            indent,
            item: false,
            col: indent,
            line_num,
        }
    }

    /// Re-read the inline content of an item line as a line of its own,
    /// positioned at the content's column.
    ///
    /// `- name: x` becomes `name: x` at column 2, `- - a` becomes the
    /// item `- a` at column 2.
    pub fn unfold(&self) -> ScanLine {
        ScanLine::classify(&self.line, self.col, self.line_num)
    }
}

/// Scan source text into scan lines.
pub fn scan(source: &str, ctx: &ParseContext) -> Result<Vec<ScanLine>> {
    let mut lines = Vec::new();

    // Editors may save files with a leading BOM
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);

    for (line_num, raw) in source.split('\n').enumerate() {
        let line_str = raw.strip_suffix('\r').unwrap_or(raw).trim_end();

        if line_str.is_empty() {
            continue;
        }

        let indent = count_indent(line_str);
        let rest = &line_str[indent..];

        // Indentation is spaces only
        if rest.starts_with('\t') {
            return Err(ctx.malformed("tab in indentation (use spaces)", line_num, indent));
        }

        lines.push(ScanLine::classify(rest, indent, line_num));
    }

    Ok(lines)
}

/// Count the number of leading spaces in a line.
fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Strip the sequence marker. A bare "-" or "- " prefix marks an item;
/// "-1" or "-x" are plain text.
fn strip_leader(rest: &str) -> Option<&str> {
    if rest == "-" {
        return Some("");
    }
    if rest.starts_with("- ") {
        Some(&rest[1..])
    } else {
        None
    }
}
