//! Extraction driver: one input file, one block kind, one output stream.

use anyhow::{Context, Result};
use protodoc_parse::{
    Diagnostic, Format, RenderStyle, Scanner, TagKind, markup_writer, render_record,
};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

/// Output format selectable on the command line or in protodoc.json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Latex,
    Markdown,
    Terminal,
    /// One JSON object per record, one per line.
    Json,
}

impl OutputFormat {
    /// Markup format, or `None` for raw JSON records.
    fn markup(self) -> Option<Format> {
        match self {
            OutputFormat::Latex => Some(Format::Latex),
            OutputFormat::Markdown => Some(Format::Markdown),
            OutputFormat::Terminal => Some(Format::Terminal),
            OutputFormat::Json => None,
        }
    }
}

/// Options resolved from CLI arguments and config.
pub struct RunOpts {
    pub kind: TagKind,
    pub file: PathBuf,
    pub format: OutputFormat,
    pub style: RenderStyle,
}

/// What a run produced besides the document itself.
#[derive(Debug)]
pub struct RunReport {
    pub kind: TagKind,
    pub records: usize,
    /// Input lines read before the scan ended.
    pub lines: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan `opts.file` and stream every rendered record into `out`.
///
/// Records are written as soon as they are parsed; a malformed block stops
/// the run with an error after the preceding records have been written.
pub fn run<W: Write>(opts: &RunOpts, mut out: W) -> Result<RunReport> {
    let display = opts.file.display();
    let file =
        File::open(&opts.file).with_context(|| format!("Failed to read '{display}'"))?;
    let mut scanner = Scanner::new(BufReader::new(file), opts.kind);
    let mut records = 0;

    match opts.format.markup() {
        Some(format) => {
            let mut sink = markup_writer(format, &mut out);
            for record in scanner.by_ref() {
                let record = record.with_context(|| format!("Failed to extract from '{display}'"))?;
                render_record(&record, &opts.style, sink.as_mut())?;
                records += 1;
            }
        }
        None => {
            for record in scanner.by_ref() {
                let record = record.with_context(|| format!("Failed to extract from '{display}'"))?;
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
                records += 1;
            }
        }
    }
    out.flush()?;

    Ok(RunReport {
        kind: scanner.kind(),
        records,
        lines: scanner.lines_scanned(),
        diagnostics: scanner.diagnostics().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_input(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("protodoc-run-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn opts(kind: TagKind, file: PathBuf, format: OutputFormat) -> RunOpts {
        RunOpts {
            kind,
            file,
            format,
            style: RenderStyle::default(),
        }
    }

    #[test]
    fn version_prints_bare_text() {
        let path = temp_input("version.scala", "Protocol Version: 7.1");
        let mut out = Vec::new();
        let report = run(&opts(TagKind::VersionMarker, path, OutputFormat::Latex), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7.1\n");
        assert_eq!(report.records, 1);
        assert_eq!(report.kind, TagKind::VersionMarker);
        assert_eq!(report.lines, 1);
    }

    #[test]
    fn json_emits_one_line_per_record() {
        let path = temp_input(
            "props.scala",
            "/* Doc Property: a\nSummary: s\nArguments: None\n*/\n/* Doc Property: b\nSummary: t\nArguments: x\n*/\n",
        );
        let mut out = Vec::new();
        let report = run(&opts(TagKind::Property, path, OutputFormat::Json), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(report.records, 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "property");
        assert_eq!(first["name"], "a");
        assert_eq!(first["arguments"], "None");
    }

    #[test]
    fn earlier_records_stay_written_on_failure() {
        let path = temp_input(
            "truncated.scala",
            "/* Doc Property: a\nSummary: s\nArguments: None\n*/\n/* Doc Property: b\nSummary: t\n",
        );
        let mut out = Vec::new();
        let err = run(&opts(TagKind::Property, path, OutputFormat::Markdown), &mut out).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("ended before '*/'"), "unexpected error: {root}");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("**a**"));
        assert!(!text.contains("**b**"));
    }

    #[test]
    fn non_utf8_input_still_extracts() {
        let path = std::env::temp_dir().join("protodoc-run-test").join("latin1.scala");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            b"// caf\xe9\n/* Doc Property: p\nSummary: na\xefve\nArguments: None\n*/\n",
        )
        .unwrap();
        let mut out = Vec::new();
        let report = run(&opts(TagKind::Property, path, OutputFormat::Json), &mut out).unwrap();
        assert_eq!(report.records, 1);
        assert_eq!(report.lines, 5);
        let rec: serde_json::Value = serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
        assert_eq!(rec["summary"], "na\u{FFFD}ve");
    }

    #[test]
    fn missing_input_is_an_error() {
        let path = std::env::temp_dir().join("protodoc-missing-input.scala");
        let mut out = Vec::new();
        assert!(run(&opts(TagKind::RpcCall, path, OutputFormat::Latex), &mut out).is_err());
        assert!(out.is_empty());
    }
}
