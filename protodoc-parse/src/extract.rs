//! Field extraction: reading delimiter-bounded text out of a block.
//!
//! Every field of a block is read with the same left margin (the tag column
//! plus two). A field ends at the first line containing its stop marker, which
//! is the label of the following field or the block's closing delimiter.

use std::io::BufRead;

use crate::error::{Diagnostic, ExtractError, Result};
use crate::lines::{LineSource, RawLine};
use crate::types::BlockTag;

/// Result of stripping the comment margin from one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripped<'a> {
    pub rest: &'a str,
    /// False when content started inside the margin and was kept.
    pub aligned: bool,
}

fn is_margin_char(ch: char) -> bool {
    ch.is_whitespace() || ch == '*' || ch == '/'
}

/// Strip up to `margin` leading characters of comment margin from `text`.
///
/// Stripping stops early at the first character that is not whitespace, `*`
/// or `/`; such content is kept instead of being cut. A line shorter than the
/// margin contributes nothing.
pub fn strip_margin(text: &str, margin: usize) -> Stripped<'_> {
    for (taken, (idx, ch)) in text.char_indices().enumerate() {
        if taken == margin {
            return Stripped {
                rest: &text[idx..],
                aligned: true,
            };
        }
        if !is_margin_char(ch) {
            return Stripped {
                rest: &text[idx..],
                aligned: false,
            };
        }
    }
    Stripped {
        rest: "",
        aligned: true,
    }
}

/// Reads the fields of one block from a shared line source.
///
/// Text following a stop marker on its own line is carried over and opens the
/// next field, so `Summary: does a thing` yields a summary of `does a thing`.
pub struct FieldReader<'a, R> {
    source: &'a mut LineSource<R>,
    diagnostics: &'a mut Vec<Diagnostic>,
    tag: BlockTag,
    carry: String,
}

impl<'a, R: BufRead> FieldReader<'a, R> {
    pub fn new(
        source: &'a mut LineSource<R>,
        diagnostics: &'a mut Vec<Diagnostic>,
        tag: BlockTag,
    ) -> Self {
        Self {
            source,
            diagnostics,
            tag,
            carry: String::new(),
        }
    }

    /// Start the next field with `text` (the remainder of a label line).
    pub fn seed(&mut self, text: &str) {
        self.carry = text.to_string();
    }

    /// Pull the next raw line, failing if the block is cut off.
    pub fn next_raw(&mut self, expected: &'static str) -> Result<RawLine> {
        self.source
            .next_line()?
            .ok_or(ExtractError::TruncatedBlock {
                kind: self.tag.kind,
                line: self.tag.line,
                expected,
            })
    }

    /// Pull the next line with the margin stripped.
    pub fn next_stripped(&mut self, expected: &'static str) -> Result<String> {
        let line = self.next_raw(expected)?;
        Ok(self.strip(&line).to_string())
    }

    /// Consume lines up to the one containing `stop` and return the trimmed
    /// text before it. The stop line is consumed; whatever follows the marker
    /// on it becomes the start of the next field.
    ///
    /// Carried text is searched first, so `Example return: (x) */` closes the
    /// block on the same line.
    pub fn read_until(&mut self, stop: &'static str) -> Result<String> {
        let mut acc = std::mem::take(&mut self.carry);
        if let Some(pos) = acc.find(stop) {
            self.carry = acc[pos + stop.len()..].to_string();
            acc.truncate(pos);
            return Ok(acc.trim().to_string());
        }
        loop {
            let line = self.next_raw(stop)?;
            if let Some(pos) = line.text.find(stop) {
                self.carry = line.text[pos + stop.len()..].to_string();
                return Ok(acc.trim().to_string());
            }
            acc.push_str(self.strip(&line));
        }
    }

    fn strip<'l>(&mut self, line: &'l RawLine) -> &'l str {
        let margin = self.tag.margin();
        let stripped = strip_margin(&line.text, margin);
        if !stripped.aligned {
            self.diagnostics.push(Diagnostic {
                line: line.number,
                message: format!(
                    "text starts inside the {margin}-column margin of the {} block opened at line {}",
                    self.tag.kind, self.tag.line
                ),
            });
        }
        stripped.rest
    }
}
