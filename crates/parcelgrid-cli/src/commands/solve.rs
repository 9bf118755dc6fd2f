//! Solve command handler: plan every customer in a scenario.

use anyhow::{Context, Result};
use tracing::info;

use parcelgrid_cli::input::ScenarioSource;
use parcelgrid_cli::output::{emit, emit_json, OutputFormat};
use parcelgrid_lib::{render_plan, solve, AssignmentPolicy, SolveOptions, Strategy};

/// Arguments for the solve command.
#[derive(Debug, Clone)]
pub struct SolveCommandArgs {
    pub source: ScenarioSource,
    pub strategy: Option<Strategy>,
    pub policy: Option<AssignmentPolicy>,
    pub min_traffic: Option<u32>,
    pub serial: bool,
    pub format: OutputFormat,
}

impl SolveCommandArgs {
    /// Flags given on the command line win over the scenario's options block.
    pub fn merge_options(&self, base: Option<SolveOptions>) -> SolveOptions {
        let mut options = base.unwrap_or_default();
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if let Some(min_traffic) = self.min_traffic {
            options.min_traffic = min_traffic;
        }
        if self.serial {
            options.parallel = false;
        }
        options
    }
}

pub fn handle_solve(args: &SolveCommandArgs) -> Result<()> {
    let scenario = args.source.load()?;
    let options = args.merge_options(scenario.options);
    let plan = solve(&scenario, &options).context("failed to plan deliveries")?;
    info!(
        strategy = %plan.strategy,
        deliveries = plan.deliveries.len(),
        total_cost = plan.total_cost(),
        "plan ready"
    );

    match args.format.render_mode() {
        Some(mode) => emit(&render_plan(&plan, mode)),
        None => emit_json(&plan)?,
    }
    Ok(())
}
