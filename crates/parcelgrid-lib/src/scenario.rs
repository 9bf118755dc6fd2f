//! Scenario ingestion: the structured JSON description of a delivery
//! problem, plus the legacy semicolon-delimited encoding.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Coord, Grid, Tunnel};
use crate::solve::SolveOptions;

/// A directional traffic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficEdge {
    pub from: Coord,
    pub to: Coord,
    pub level: u8,
}

impl TrafficEdge {
    pub const fn new(from: Coord, to: Coord, level: u8) -> Self {
        Self { from, to, level }
    }
}

/// Everything needed to plan deliveries on one grid.
///
/// With `symmetric_traffic` (the default) each listed edge is mirrored in
/// the reverse direction unless that reverse edge is itself listed. Set it
/// to `false` to take the list as strictly directional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub rows: i32,
    pub columns: i32,
    #[serde(default)]
    pub stores: Vec<Coord>,
    #[serde(default)]
    pub customers: Vec<Coord>,
    #[serde(default)]
    pub tunnels: Vec<Tunnel>,
    #[serde(default)]
    pub traffic: Vec<TrafficEdge>,
    /// Truck start cells; one truck per store when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trucks: Option<Vec<Coord>>,
    #[serde(default = "default_symmetric")]
    pub symmetric_traffic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SolveOptions>,
}

fn default_symmetric() -> bool {
    true
}

impl Scenario {
    /// An empty scenario with no edges, stores or customers.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            stores: Vec::new(),
            customers: Vec::new(),
            tunnels: Vec::new(),
            traffic: Vec::new(),
            trucks: None,
            symmetric_traffic: true,
            options: None,
        }
    }

    pub fn with_store(mut self, at: Coord) -> Self {
        self.stores.push(at);
        self
    }

    pub fn with_customer(mut self, at: Coord) -> Self {
        self.customers.push(at);
        self
    }

    pub fn with_truck(mut self, at: Coord) -> Self {
        self.trucks.get_or_insert_with(Vec::new).push(at);
        self
    }

    pub fn with_tunnel(mut self, from: Coord, to: Coord) -> Self {
        self.tunnels.push(Tunnel::new(from, to));
        self
    }

    /// List every lattice edge once (rightwards and downwards) at `level`.
    pub fn with_uniform_traffic(mut self, level: u8) -> Self {
        for x in 0..self.rows {
            for y in 0..self.columns {
                let here = Coord::new(x, y);
                if y + 1 < self.columns {
                    self.traffic
                        .push(TrafficEdge::new(here, Coord::new(x, y + 1), level));
                }
                if x + 1 < self.rows {
                    self.traffic
                        .push(TrafficEdge::new(here, Coord::new(x + 1, y), level));
                }
            }
        }
        self
    }

    /// Append an explicit traffic entry; later entries override earlier ones.
    pub fn with_edge(mut self, from: Coord, to: Coord, level: u8) -> Self {
        self.traffic.push(TrafficEdge::new(from, to, level));
        self
    }

    pub fn with_symmetric_traffic(mut self, symmetric: bool) -> Self {
        self.symmetric_traffic = symmetric;
        self
    }

    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            rows = scenario.rows,
            columns = scenario.columns,
            customers = scenario.customers.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Parse the legacy string pair.
    ///
    /// `state` is `m;n;P;S;cx,cy,...;x1,y1,x2,y2,...`: grid size, package
    /// count, store count, customer cells, then tunnel endpoint quadruples.
    /// Stores are implied by `S`: `(0,0)`, `(m-1,n-1)` and `(m-1,0)` in that
    /// order. `traffic` is `x1,y1,x2,y2,level;...`, taken as directional;
    /// segments with fewer than five fields are ignored.
    pub fn from_legacy(state: &str, traffic: &str) -> Result<Self> {
        let parts: Vec<&str> = state.trim().split(';').map(str::trim).collect();
        if parts.len() < 4 {
            return Err(malformed(format!(
                "expected at least 'm;n;P;S', got '{}'",
                state.trim()
            )));
        }

        let rows = parse_int(parts[0], "row count")?;
        let columns = parse_int(parts[1], "column count")?;
        let packages = parse_int(parts[2], "package count")?;
        let store_count = parse_int(parts[3], "store count")?;
        if rows <= 0 || columns <= 0 {
            return Err(Error::InvalidDimensions { rows, columns });
        }

        let customers = match parts.get(4).filter(|field| !field.is_empty()) {
            Some(field) => parse_coords(field, 2, "customer")?
                .chunks_exact(2)
                .map(|pair| Coord::new(pair[0], pair[1]))
                .collect(),
            None => Vec::new(),
        };
        if usize::try_from(packages).ok() != Some(customers.len()) {
            tracing::warn!(
                packages,
                customers = customers.len(),
                "legacy package count disagrees with customer list"
            );
        }

        let tunnels = match parts.get(5).filter(|field| !field.is_empty()) {
            Some(field) => parse_coords(field, 4, "tunnel")?
                .chunks_exact(4)
                .map(|quad| Tunnel::new(Coord::new(quad[0], quad[1]), Coord::new(quad[2], quad[3])))
                .collect(),
            None => Vec::new(),
        };

        if !(0..=3).contains(&store_count) {
            tracing::warn!(store_count, "legacy store count clamped to 0..=3");
        }
        let stores: Vec<Coord> = [
            Coord::new(0, 0),
            Coord::new(rows - 1, columns - 1),
            Coord::new(rows - 1, 0),
        ]
        .into_iter()
        .take(store_count.clamp(0, 3) as usize)
        .collect();

        let mut edges = Vec::new();
        for segment in traffic.split(';') {
            let fields: Vec<&str> = segment.split(',').map(str::trim).collect();
            if fields.len() < 5 {
                continue;
            }
            let from = Coord::new(
                parse_int(fields[0], "traffic x1")?,
                parse_int(fields[1], "traffic y1")?,
            );
            let to = Coord::new(
                parse_int(fields[2], "traffic x2")?,
                parse_int(fields[3], "traffic y2")?,
            );
            let level = fields[4]
                .parse::<u8>()
                .map_err(|_| malformed(format!("invalid traffic level '{}'", fields[4])))?;
            edges.push(TrafficEdge::new(from, to, level));
        }

        Ok(Self {
            rows,
            columns,
            stores,
            customers,
            tunnels,
            traffic: edges,
            trucks: None,
            symmetric_traffic: false,
            options: None,
        })
    }

    /// Truck start cells: the explicit list, or one per store.
    pub fn truck_positions(&self) -> Vec<Coord> {
        self.trucks.clone().unwrap_or_else(|| self.stores.clone())
    }

    /// Build the grid and check every location against it.
    pub fn build_grid(&self) -> Result<Grid> {
        let grid = Grid::from_scenario(self)?;
        for &at in &self.stores {
            grid.check_bounds(at, "store")?;
        }
        for &at in &self.customers {
            grid.check_bounds(at, "customer")?;
        }
        for at in self.trucks.iter().flatten() {
            grid.check_bounds(*at, "truck")?;
        }
        Ok(grid)
    }

    /// Reject scenarios with bad dimensions, out-of-bounds locations,
    /// out-of-range traffic, non-adjacent edges or degenerate tunnels.
    pub fn validate(&self) -> Result<()> {
        self.build_grid().map(|_| ())
    }
}

impl Grid {
    /// Build the traffic map and tunnel list described by `scenario`.
    ///
    /// Only the grid itself is checked here; use
    /// [`Scenario::build_grid`] to also check stores, customers and trucks.
    pub fn from_scenario(scenario: &Scenario) -> Result<Grid> {
        let mut grid = Grid::new(scenario.rows, scenario.columns)?;

        if scenario.symmetric_traffic {
            let explicit: HashSet<(Coord, Coord)> = scenario
                .traffic
                .iter()
                .map(|edge| (edge.from, edge.to))
                .collect();
            for edge in &scenario.traffic {
                if !explicit.contains(&(edge.to, edge.from)) {
                    grid.set_traffic(edge.to, edge.from, edge.level)?;
                }
            }
        }
        for edge in &scenario.traffic {
            grid.set_traffic(edge.from, edge.to, edge.level)?;
        }

        for tunnel in &scenario.tunnels {
            grid.add_tunnel(*tunnel)?;
        }
        Ok(grid)
    }
}

fn malformed(message: String) -> Error {
    Error::MalformedScenario { message }
}

fn parse_int(raw: &str, what: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| malformed(format!("invalid {what} '{raw}'")))
}

/// Parse a comma-separated integer list whose length is a multiple of
/// `group`.
fn parse_coords(field: &str, group: usize, what: &str) -> Result<Vec<i32>> {
    let values = field
        .split(',')
        .map(|raw| parse_int(raw, what))
        .collect::<Result<Vec<_>>>()?;
    if values.len() % group != 0 {
        return Err(malformed(format!(
            "{what} list '{field}' must hold groups of {group} integers"
        )));
    }
    Ok(values)
}
