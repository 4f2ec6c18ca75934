//! LaTeX renderer.
//!
//! Writes each primitive as its own line of LaTeX source. Text is passed
//! through unescaped so existing document preambles keep working.

use std::io::{self, Write};

use crate::render::Markup;

pub struct LatexWriter<W> {
    out: W,
}

impl<W: Write> LatexWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Markup for LatexWriter<W> {
    fn text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    fn bold(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\\textbf{{{text}}}")
    }

    fn paragraph_break(&mut self) -> io::Result<()> {
        writeln!(self.out, "\\\\")
    }

    fn vspace(&mut self, length: &str) -> io::Result<()> {
        writeln!(self.out, "\\vspace{{{length}}}")
    }

    fn verbatim(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\\begin{{verbatim}}")?;
        writeln!(self.out, "{text}")?;
        writeln!(self.out, "\\end{{verbatim}}")
    }

    fn begin_quote(&mut self) -> io::Result<()> {
        writeln!(self.out, "\\begin{{quote}}")
    }

    fn end_quote(&mut self) -> io::Result<()> {
        writeln!(self.out, "\\end{{quote}}")
    }
}
