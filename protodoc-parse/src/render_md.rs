//! Markdown renderer.
//!
//! Degrades each primitive to CommonMark: quoted blocks become `>` quotes,
//! verbatim blocks become fenced code, vertical space becomes a blank line.

use std::io::{self, Write};

use crate::render::{Markup, QuotedLines};

pub struct MarkdownWriter<W> {
    lines: QuotedLines<W>,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            lines: QuotedLines::new(out, "> "),
        }
    }
}

impl<W: Write> Markup for MarkdownWriter<W> {
    fn text(&mut self, text: &str) -> io::Result<()> {
        self.lines.lines(text)
    }

    fn bold(&mut self, text: &str) -> io::Result<()> {
        self.lines.line(&format!("**{text}**"))
    }

    fn paragraph_break(&mut self) -> io::Result<()> {
        self.lines.blank()
    }

    fn vspace(&mut self, _length: &str) -> io::Result<()> {
        self.lines.blank()
    }

    fn verbatim(&mut self, text: &str) -> io::Result<()> {
        self.lines.line("```")?;
        self.lines.lines(text)?;
        self.lines.line("```")
    }

    fn begin_quote(&mut self) -> io::Result<()> {
        self.lines.blank()?;
        self.lines.open();
        Ok(())
    }

    fn end_quote(&mut self) -> io::Result<()> {
        self.lines.close();
        self.lines.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderStyle, render_record};
    use crate::types::Record;
    use pretty_assertions::assert_eq;

    fn markdown(record: &Record) -> String {
        let mut buf = Vec::new();
        {
            let mut w = MarkdownWriter::new(&mut buf);
            render_record(record, &RenderStyle::default(), &mut w).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn property_as_blockquote() {
        let rec = Record::Property {
            name: "java-flags".into(),
            summary: "Flags for the JVM.".into(),
            arguments: "None".into(),
            line: 1,
        };
        assert_eq!(
            markdown(&rec),
            concat!(
                "**java-flags**\n",
                "\n",
                "> Flags for the JVM.\n",
                ">\n",
                "> **Arguments:**\n",
                "> None\n",
                "\n",
            )
        );
    }

    #[test]
    fn structure_is_fenced() {
        let rec = Record::Event {
            name: "clear-all-notes".into(),
            summary: "Clear notes.".into(),
            structure: "(:clear-all-scala-notes)".into(),
            line: 1,
        };
        let md = markdown(&rec);
        assert!(md.contains("> ```\n> (:clear-all-scala-notes)\n> ```\n"));
    }
}
