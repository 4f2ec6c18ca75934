use anyhow::{Context, Result};
use protodoc_parse::RenderStyle;
use serde::Deserialize;
use std::path::Path;

use crate::run::OutputFormat;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "protodoc.json";

/// protodoc.json schema. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtodocConfig {
    /// Input file used when none is given on the command line.
    #[serde(default)]
    pub input: Option<String>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub latex: RenderStyle,

    /// Report lines whose text starts inside a block's comment margin.
    #[serde(default)]
    pub warn_unindented: bool,
}

/// Load config from `explicit`, or from `protodoc.json` in the working
/// directory. A missing default file yields defaults; a missing explicit
/// file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<ProtodocConfig> {
    let config_path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(CONFIG_FILE);
            if !default.exists() {
                return Ok(ProtodocConfig::default());
            }
            default
        }
    };

    let raw = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: ProtodocConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    Ok(config)
}
