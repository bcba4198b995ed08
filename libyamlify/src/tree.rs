//! Phase 2: Tree Builder
//!
//! The tree builder turns scan lines into a [`Node`] tree by recursive
//! descent over indentation blocks. A block is the run of lines that share
//! one indent; its first line decides its kind:
//! - an item line (`- ...`) opens a `Sequence`
//! - a `key: value` line opens a `Mapping`
//! - anything else is a bare `Scalar` and must stand alone
//!
//! A line indented less than the current block closes it. A line indented
//! deeper than its block, without a `key:` or `-` above it to own it, does
//! not match any enclosing block and is rejected.

use crate::error::{ParseContext, Result};
use crate::node::Node;
use crate::scanner::ScanLine;

/// Build the tree for a whole document.
pub fn build(lines: Vec<ScanLine>, ctx: &ParseContext) -> Result<Node> {
    let mut builder = TreeBuilder {
        lines,
        pos: 0,
        ctx,
    };

    let indent = match builder.peek() {
        Some(first) => first.indent,
        None => return Err(ctx.malformed("document is empty", 0, 0)),
    };

    let root = builder.parse_block(indent)?;

    // Everything must belong to the root block
    if let Some(t) = builder.peek() {
        let reason = if t.indent == indent {
            "unexpected content after the document root"
        } else {
            "indentation does not match any enclosing block"
        };
        return Err(ctx.malformed(reason, t.line_num, t.indent));
    }

    Ok(root)
}

struct TreeBuilder<'a> {
    lines: Vec<ScanLine>,
    pos: usize,
    ctx: &'a ParseContext,
}

impl TreeBuilder<'_> {
    fn peek(&self) -> Option<&ScanLine> {
        self.lines.get(self.pos)
    }

    /// Parse the block whose first line is the current line, at `indent`.
    fn parse_block(&mut self, indent: usize) -> Result<Node> {
        let Some(first) = self.peek() else {
            return Ok(Node::Scalar(String::new()));
        };

        if first.item {
            self.parse_sequence(indent)
        } else if split_entry(&first.line).is_some() {
            self.parse_mapping(indent)
        } else {
            self.parse_scalar(indent)
        }
    }

    fn parse_scalar(&mut self, indent: usize) -> Result<Node> {
        let current = &self.lines[self.pos];
        let (text, line_num, col) = (current.line.clone(), current.line_num, current.col);
        self.pos += 1;

        if let Some(next) = self.peek() {
            // A `key: value` sibling means this line was meant as an entry
            if next.indent == indent && !next.item && split_entry(&next.line).is_some() {
                return Err(self.ctx.malformed("expected `key: value`", line_num, col));
            }
            if next.indent > indent {
                return Err(self.ctx.malformed(
                    "a scalar cannot have nested content",
                    next.line_num,
                    next.indent,
                ));
            }
        }

        Ok(Node::Scalar(text))
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Node> {
        let mut items = Vec::new();

        while let Some(t) = self.peek() {
            if t.indent < indent || (t.indent == indent && !t.item) {
                break;
            }
            if t.indent > indent {
                return Err(self.bad_indent(t));
            }

            let item = t.clone();
            let node = if item.line.is_empty() {
                // "-" alone: the item's value is the deeper block below it
                self.pos += 1;
                match self.peek() {
                    Some(next) if next.indent > indent => {
                        let nested = next.indent;
                        self.parse_block(nested)?
                    }
                    _ => Node::Scalar(String::new()),
                }
            } else {
                // "- content": read the content as a line at its own column
                let unfolded = item.unfold();
                let col = unfolded.indent;
                self.lines[self.pos] = unfolded;
                self.parse_block(col)?
            };
            items.push(node);
        }

        Ok(Node::Sequence(items))
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Node> {
        let mut entries: Vec<(String, Node)> = Vec::new();

        while let Some(t) = self.peek() {
            if t.indent < indent || (t.indent == indent && t.item) {
                break;
            }
            if t.indent > indent {
                return Err(self.bad_indent(t));
            }

            let Some((key, value)) = split_entry(&t.line) else {
                return Err(self
                    .ctx
                    .malformed("expected `key: value`", t.line_num, t.col));
            };
            if key.is_empty() {
                return Err(self.ctx.malformed("empty key", t.line_num, t.col));
            }
            if entries.iter().any(|(k, _)| k == key) {
                return Err(self.ctx.malformed(
                    format!("duplicate key `{}`", key),
                    t.line_num,
                    t.col,
                ));
            }

            let key = key.to_string();
            let value = value.to_string();
            self.pos += 1;

            let node = if !value.is_empty() {
                Node::Scalar(value)
            } else {
                match self.peek() {
                    Some(next) if next.indent > indent => {
                        let nested = next.indent;
                        self.parse_block(nested)?
                    }
                    // Compact form: the sequence sits at the key's own indent
                    Some(next) if next.indent == indent && next.item => {
                        self.parse_sequence(indent)?
                    }
                    _ => Node::Scalar(String::new()),
                }
            };
            entries.push((key, node));
        }

        Ok(Node::Mapping(entries))
    }

    fn bad_indent(&self, t: &ScanLine) -> crate::Error {
        self.ctx.malformed(
            "indentation does not match any enclosing block",
            t.line_num,
            t.indent,
        )
    }
}

/// Split `key: value` at the first colon followed by a space or the end of
/// the line. Returns trimmed key and value.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' && (i + 1 == bytes.len() || bytes[i + 1] == b' ') {
            return Some((line[..i].trim_end(), line[i + 1..].trim()));
        }
    }
    None
}
