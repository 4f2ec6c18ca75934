//! ANSI terminal renderer.
//!
//! Uses the `colored` crate for emphasis; quoted blocks get a vertical bar
//! border and verbatim text is dimmed and indented.

use std::io::{self, Write};

use colored::Colorize;

use crate::render::{Markup, QuotedLines};

pub struct TerminalWriter<W> {
    lines: QuotedLines<W>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            lines: QuotedLines::new(out, "\u{2502} "), // │
        }
    }
}

impl<W: Write> Markup for TerminalWriter<W> {
    fn text(&mut self, text: &str) -> io::Result<()> {
        self.lines.lines(text)
    }

    fn bold(&mut self, text: &str) -> io::Result<()> {
        self.lines.line(&format!("{}", text.bold()))
    }

    fn paragraph_break(&mut self) -> io::Result<()> {
        self.lines.blank()
    }

    fn vspace(&mut self, _length: &str) -> io::Result<()> {
        self.lines.blank()
    }

    fn verbatim(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.lines.line(&format!("    {}", line.dimmed()))?;
        }
        Ok(())
    }

    fn begin_quote(&mut self) -> io::Result<()> {
        self.lines.open();
        Ok(())
    }

    fn end_quote(&mut self) -> io::Result<()> {
        self.lines.close();
        self.lines.flush()
    }
}
