//! `protodoc-parse` — extractor for tagged protocol documentation comments.
//!
//! Protocol sources carry their reference documentation as doc comments
//! opened by a tag such as `Doc RPC:` and laid out as labelled fields:
//!
//! ```text
//! /**
//!  * Doc RPC:
//!  *   swank:connection-info
//!  * Summary:
//!  *   Request connection information.
//!  * Arguments:
//!  *   None
//!  * ...
//!  */
//! ```
//!
//! This crate scans a source for blocks of one kind, extracts each into a
//! typed [`Record`] and renders records as LaTeX, markdown or terminal text.
//!
//! # Quick start
//!
//! ```
//! use protodoc_parse::TagKind;
//!
//! let records = protodoc_parse::extract("// Protocol Version: 0.7\n", TagKind::VersionMarker).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

pub mod error;
pub mod extract;
pub mod grammar;
pub mod lines;
pub mod render;
pub mod render_latex;
pub mod render_md;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod scan;
pub mod types;

use std::io::Write;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use render::{Markup, RenderStyle, render_record};
pub use scan::Scanner;
pub use types::*;

/// Markup output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Latex,
    Markdown,
    #[cfg(feature = "terminal")]
    Terminal,
}

/// Box a markup sink of the given format around `out`.
pub fn markup_writer<'a, W: Write + 'a>(format: Format, out: W) -> Box<dyn Markup + 'a> {
    match format {
        Format::Latex => Box::new(render_latex::LatexWriter::new(out)),
        Format::Markdown => Box::new(render_md::MarkdownWriter::new(out)),
        #[cfg(feature = "terminal")]
        Format::Terminal => Box::new(render_term::TerminalWriter::new(out)),
    }
}

/// Extract every record of `kind` from `input`, in order.
pub fn extract(input: &str, kind: TagKind) -> Result<Vec<Record>> {
    Scanner::new(input.as_bytes(), kind).collect()
}

/// Extract and render every record of `kind` from `input` as one document.
///
/// Fails without output if any block is malformed.
pub fn render_document(
    input: &str,
    kind: TagKind,
    format: Format,
    style: &RenderStyle,
) -> Result<String> {
    let records = extract(input, kind)?;
    let mut buf = Vec::new();
    {
        let mut out = markup_writer(format, &mut buf);
        for record in &records {
            render_record(record, style, out.as_mut())?;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
