//! Path command handler: a single start-to-goal query.

use anyhow::{Context, Result};

use parcelgrid_cli::input::ScenarioSource;
use parcelgrid_cli::output::{emit, emit_json, OutputFormat};
use parcelgrid_lib::{path, Coord, DeliveryProblem, PathSummary, Strategy};

/// Arguments for the path command.
#[derive(Debug, Clone)]
pub struct PathCommandArgs {
    pub source: ScenarioSource,
    pub from: Coord,
    pub to: Coord,
    pub strategy: Strategy,
    pub min_traffic: Option<u32>,
    pub format: OutputFormat,
}

pub fn handle_path(args: &PathCommandArgs) -> Result<()> {
    let scenario = args.source.load()?;
    let grid = scenario.build_grid()?;
    let min_traffic = args
        .min_traffic
        .or(scenario.options.map(|options| options.min_traffic));

    let mut problem = DeliveryProblem::new(&grid, args.from, args.to);
    if let Some(min_traffic) = min_traffic {
        problem = problem.with_min_traffic(min_traffic);
    }
    let result = path(&mut problem, args.from, args.to, args.strategy)
        .with_context(|| format!("failed to search {} -> {}", args.from, args.to))?;
    let summary = PathSummary::new(args.strategy, args.from, args.to, &result);

    match args.format.render_mode() {
        Some(mode) => emit(&summary.render(mode)),
        None => emit_json(&summary)?,
    }
    Ok(())
}
