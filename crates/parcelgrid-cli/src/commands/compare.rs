//! Compare command handler: run every strategy over one scenario.

use anyhow::{bail, Context, Result};

use parcelgrid_cli::input::ScenarioSource;
use parcelgrid_cli::output::{emit, emit_json, OutputFormat};
use parcelgrid_lib::{compare, render_comparison, AssignmentPolicy, SolveOptions};

/// Arguments for the compare command.
#[derive(Debug, Clone)]
pub struct CompareCommandArgs {
    pub source: ScenarioSource,
    pub policy: Option<AssignmentPolicy>,
    pub min_traffic: Option<u32>,
    pub format: OutputFormat,
}

impl CompareCommandArgs {
    /// Same override order as `solve`; the strategy is ignored since every
    /// strategy runs.
    pub fn merge_options(&self, base: Option<SolveOptions>) -> SolveOptions {
        let mut options = base.unwrap_or_default();
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if let Some(min_traffic) = self.min_traffic {
            options.min_traffic = min_traffic;
        }
        options
    }
}

pub fn handle_compare(args: &CompareCommandArgs) -> Result<()> {
    if args.format == OutputFormat::Legacy {
        bail!("compare supports only the text and json formats");
    }

    let scenario = args.source.load()?;
    let options = args.merge_options(scenario.options);
    let summaries = compare(&scenario, &options).context("failed to compare strategies")?;

    match args.format {
        OutputFormat::Json => emit_json(&summaries)?,
        _ => emit(&render_comparison(&summaries)),
    }
    Ok(())
}
