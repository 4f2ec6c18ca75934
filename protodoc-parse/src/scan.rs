//! Block scanning: find tags of one kind and hand each block to its grammar.

use std::io::BufRead;

use crate::error::{Diagnostic, Result};
use crate::grammar::{Grammar, read_version};
use crate::lines::LineSource;
use crate::types::{BlockTag, Record, TagKind};

/// Iterator over the records of one kind, in input order.
///
/// Yields `Err` at most once; after an error the scan is over and the
/// iterator returns `None`.
pub struct Scanner<R> {
    source: LineSource<R>,
    kind: TagKind,
    diagnostics: Vec<Diagnostic>,
    finished: bool,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R, kind: TagKind) -> Self {
        Self {
            source: LineSource::new(reader),
            kind,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Input lines consumed so far, tag and block lines included.
    pub fn lines_scanned(&self) -> usize {
        self.source.lines_read()
    }

    /// Indentation notes collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Advance to the next tag line and parse its block.
    fn next_record(&mut self) -> Result<Option<Record>> {
        let tag_text = self.kind.tag();
        while let Some(line) = self.source.next_line()? {
            let Some(byte) = line.text.find(tag_text) else {
                continue;
            };
            let tag = BlockTag {
                kind: self.kind,
                column: line.text[..byte].chars().count(),
                line: line.number,
            };
            let after_tag = &line.text[byte + tag_text.len()..];
            let record = match Grammar::for_kind(self.kind) {
                Some(grammar) => {
                    grammar.read(tag, after_tag, &mut self.source, &mut self.diagnostics)?
                }
                None => read_version(tag, after_tag),
            };
            return Ok(Some(record));
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
