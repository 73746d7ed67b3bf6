//! Output rendering

use crate::resource::ResourceDescriptor;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Serialize descriptors in the requested format
pub fn render(resources: &[ResourceDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(resources).context("Failed to encode JSON")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yaml::to_string(resources).context("Failed to encode YAML"),
    }
}

/// Write rendered output to a file, or stdout when no path is given
pub fn write(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write output to {:?}", path)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write output")?;
            stdout.flush().context("Failed to write output")
        }
    }
}
