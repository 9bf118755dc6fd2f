//! Validate command handler: ingestion check only.

use anyhow::Result;
use serde::Serialize;

use parcelgrid_cli::input::ScenarioSource;
use parcelgrid_cli::output::{emit, emit_json, OutputFormat};
use parcelgrid_lib::Scenario;

/// Counts reported for a scenario that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub rows: i32,
    pub columns: i32,
    pub stores: usize,
    pub customers: usize,
    pub trucks: usize,
    pub tunnels: usize,
    pub traffic_edges: usize,
}

impl ScenarioReport {
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let grid = scenario.build_grid()?;
        Ok(Self {
            rows: scenario.rows,
            columns: scenario.columns,
            stores: scenario.stores.len(),
            customers: scenario.customers.len(),
            trucks: scenario.truck_positions().len(),
            tunnels: grid.tunnels().len(),
            traffic_edges: grid.edge_count(),
        })
    }

    fn render(&self) -> String {
        format!(
            "Scenario OK: {}x{} grid, {} stores, {} customers, {} trucks, {} tunnels, {} traffic edges",
            self.rows,
            self.columns,
            self.stores,
            self.customers,
            self.trucks,
            self.tunnels,
            self.traffic_edges
        )
    }
}

pub fn handle_validate(source: &ScenarioSource, format: OutputFormat) -> Result<()> {
    let scenario = source.load()?;
    let report = ScenarioReport::from_scenario(&scenario)?;
    match format {
        OutputFormat::Json => emit_json(&report)?,
        _ => emit(&report.render()),
    }
    Ok(())
}
