use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use protodoc_parse::TagKind;
use std::path::{Path, PathBuf};

mod config;
mod run;

use run::OutputFormat;

#[derive(Parser)]
#[command(
    name = "protodoc",
    version,
    about = "Generate a protocol reference from tagged doc comments"
)]
struct Cli {
    /// Kind of documentation block to extract: data, rpc, version, events,
    /// changelog or property
    #[arg(value_parser = TagKind::from_mode)]
    mode: TagKind,

    /// Protocol source file to scan (default: `input` from protodoc.json)
    file: Option<String>,

    /// Output format (default: `format` from protodoc.json, else latex)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file to use instead of ./protodoc.json
    #[arg(long)]
    config: Option<String>,

    /// Suppress the summary and warnings on stderr
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref().map(Path::new))?;

    let file = cli
        .file
        .or(config.input)
        .context("No input file given and no `input` set in protodoc.json")?;

    let opts = run::RunOpts {
        kind: cli.mode,
        file: PathBuf::from(&file),
        format: cli.format.or(config.format).unwrap_or(OutputFormat::Latex),
        style: config.latex,
    };

    let stdout = std::io::stdout();
    let report = run::run(&opts, stdout.lock())?;

    if cli.quiet {
        return Ok(());
    }

    if config.warn_unindented {
        for diag in &report.diagnostics {
            eprintln!(
                "{}:{}: {}: {}",
                file,
                diag.line,
                "warning".yellow().bold(),
                diag.message
            );
        }
    }

    eprintln!(
        "{} {} {} record(s) from {} ({} lines)",
        "Extracted".green().bold(),
        report.records,
        report.kind,
        file,
        report.lines
    );

    Ok(())
}
