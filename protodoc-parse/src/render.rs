//! Record rendering.
//!
//! A record is turned into a sequence of markup primitives written into a
//! [`Markup`] sink. Sinks decide the concrete syntax; the sequence itself is
//! the same for every output format.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::grammar::FieldStyle;
use crate::types::{NONE_SENTINEL, Record, present};

/// Markup primitives. Every call writes whole lines.
pub trait Markup {
    /// Running text.
    fn text(&mut self, text: &str) -> io::Result<()>;
    fn bold(&mut self, text: &str) -> io::Result<()>;
    fn paragraph_break(&mut self) -> io::Result<()>;
    /// Vertical space of the given length literal (e.g. `5 mm`).
    fn vspace(&mut self, length: &str) -> io::Result<()>;
    fn verbatim(&mut self, text: &str) -> io::Result<()>;
    fn begin_quote(&mut self) -> io::Result<()>;
    fn end_quote(&mut self) -> io::Result<()>;
}

/// Spacing used between records and between the fields of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderStyle {
    pub record_space: String,
    pub field_space: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            record_space: "5 mm".to_string(),
            field_space: "1 mm".to_string(),
        }
    }
}

/// Heading printed above a change log.
pub const CHANGE_LOG_HEADING: &str = "Protocol Change Log";

/// Write one record into `out`.
///
/// Named records render as a bold name followed by a quoted block holding the
/// summary and the remaining fields in grammar order. A version marker renders
/// as its bare text.
pub fn render_record<M: Markup + ?Sized>(
    record: &Record,
    style: &RenderStyle,
    out: &mut M,
) -> io::Result<()> {
    match record {
        Record::Version { version, .. } => out.text(version),
        Record::ChangeLog { log, .. } => {
            out.bold(CHANGE_LOG_HEADING)?;
            out.verbatim(log)?;
            out.vspace(&style.record_space)
        }
        _ => {
            out.bold(record.name().unwrap_or_default())?;
            out.begin_quote()?;
            for (index, (field, text)) in record.fields().into_iter().enumerate() {
                if index > 0 {
                    out.paragraph_break()?;
                    out.vspace(&style.field_space)?;
                }
                match field.style {
                    FieldStyle::Prose => out.text(text)?,
                    FieldStyle::Verbatim => {
                        out.bold(field.label)?;
                        out.verbatim(text)?;
                    }
                    FieldStyle::Optional => {
                        out.bold(field.label)?;
                        match present(text) {
                            Some(text) => out.verbatim(text)?,
                            None => out.text(NONE_SENTINEL)?,
                        }
                    }
                }
            }
            out.end_quote()?;
            out.vspace(&style.record_space)
        }
    }
}

/// Line-oriented writer shared by the markdown and terminal sinks.
///
/// Prefixes every line with one quote marker per open quote and collapses
/// runs of blank lines.
pub(crate) struct QuotedLines<W> {
    out: W,
    marker: String,
    depth: usize,
    last_blank: bool,
}

impl<W: Write> QuotedLines<W> {
    pub(crate) fn new(out: W, marker: impl Into<String>) -> Self {
        Self {
            out,
            marker: marker.into(),
            depth: 0,
            // Suppresses a leading blank line at the start of the output.
            last_blank: true,
        }
    }

    pub(crate) fn line(&mut self, text: &str) -> io::Result<()> {
        let prefix = self.marker.repeat(self.depth);
        if text.is_empty() {
            writeln!(self.out, "{}", prefix.trim_end())?;
        } else {
            writeln!(self.out, "{prefix}{text}")?;
        }
        self.last_blank = false;
        Ok(())
    }

    pub(crate) fn lines(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.line(line)?;
        }
        Ok(())
    }

    pub(crate) fn blank(&mut self) -> io::Result<()> {
        if !self.last_blank {
            self.line("")?;
            self.last_blank = true;
        }
        Ok(())
    }

    pub(crate) fn open(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records primitive calls for inspection.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Markup for Trace {
        fn text(&mut self, text: &str) -> io::Result<()> {
            self.0.push(format!("text {text}"));
            Ok(())
        }
        fn bold(&mut self, text: &str) -> io::Result<()> {
            self.0.push(format!("bold {text}"));
            Ok(())
        }
        fn paragraph_break(&mut self) -> io::Result<()> {
            self.0.push("par".into());
            Ok(())
        }
        fn vspace(&mut self, length: &str) -> io::Result<()> {
            self.0.push(format!("vspace {length}"));
            Ok(())
        }
        fn verbatim(&mut self, text: &str) -> io::Result<()> {
            self.0.push(format!("verbatim {text}"));
            Ok(())
        }
        fn begin_quote(&mut self) -> io::Result<()> {
            self.0.push("quote".into());
            Ok(())
        }
        fn end_quote(&mut self) -> io::Result<()> {
            self.0.push("endquote".into());
            Ok(())
        }
    }

    fn trace(record: &Record) -> Vec<String> {
        let mut t = Trace::default();
        render_record(record, &RenderStyle::default(), &mut t).unwrap();
        t.0
    }

    #[test]
    fn property_with_no_arguments() {
        let rec = Record::Property {
            name: "java-flags".into(),
            summary: "Flags for the JVM.".into(),
            arguments: "None".into(),
            line: 1,
        };
        assert_eq!(
            trace(&rec),
            vec![
                "bold java-flags",
                "quote",
                "text Flags for the JVM.",
                "par",
                "vspace 1 mm",
                "bold Arguments:",
                "text None",
                "endquote",
                "vspace 5 mm",
            ]
        );
    }

    #[test]
    fn rpc_fields_in_grammar_order() {
        let rec = Record::Rpc {
            name: "swank:ping".into(),
            summary: "Ping.".into(),
            arguments: "(a b)".into(),
            return_shape: "None".into(),
            example_call: "(ping)".into(),
            example_return: "(pong)".into(),
            line: 1,
        };
        let bolds: Vec<String> = trace(&rec)
            .into_iter()
            .filter(|p| p.starts_with("bold") || p.starts_with("verbatim"))
            .collect();
        assert_eq!(
            bolds,
            vec![
                "bold swank:ping",
                "bold Arguments:",
                "verbatim (a b)",
                "bold Return:",
                "bold Example call:",
                "verbatim (ping)",
                "bold Example return:",
                "verbatim (pong)",
            ]
        );
    }

    #[test]
    fn version_is_bare_text() {
        let rec = Record::Version {
            version: "7.1".into(),
            line: 1,
        };
        assert_eq!(trace(&rec), vec!["text 7.1"]);
    }

    #[test]
    fn quoted_lines_prefix_and_collapse() {
        let mut buf = Vec::new();
        {
            let mut w = QuotedLines::new(&mut buf, "> ");
            w.line("top").unwrap();
            w.open();
            w.lines("a\nb").unwrap();
            w.blank().unwrap();
            w.blank().unwrap();
            w.line("c").unwrap();
            w.close();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "top\n> a\n> b\n>\n> c\n");
    }
}
