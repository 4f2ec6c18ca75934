//! Forward-only line cursor over an input stream.

use std::io::BufRead;

use crate::error::Result;

/// A single input line, terminator included, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

/// Pull-based cursor yielding each line of the input once.
///
/// `next_line` returns `Ok(None)` at end of input and keeps returning it on
/// every later call. There is no seeking or rewind. Bytes that are not valid
/// UTF-8 decode to U+FFFD rather than failing the read.
pub struct LineSource<R> {
    reader: R,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            done: false,
        }
    }

    pub fn next_line(&mut self) -> Result<Option<RawLine>> {
        if self.done {
            return Ok(None);
        }
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            self.done = true;
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(RawLine {
            number: self.line_no,
            text: String::from_utf8_lossy(&buf).into_owned(),
        }))
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}
