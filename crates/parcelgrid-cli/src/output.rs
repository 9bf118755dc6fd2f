//! Output format selection and printing helpers.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use parcelgrid_lib::RenderMode;

/// Format used when printing results to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Semicolon-delimited delivery lines.
    Legacy,
}

impl OutputFormat {
    /// The library render mode for textual formats; `None` for JSON.
    pub fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::Text),
            OutputFormat::Legacy => Some(RenderMode::Legacy),
            OutputFormat::Json => None,
        }
    }
}

/// Print `rendered` to stdout, ending with exactly one newline.
pub fn emit(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}

/// Print `value` as pretty JSON.
pub fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
