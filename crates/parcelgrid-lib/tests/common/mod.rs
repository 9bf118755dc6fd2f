//! Common test utilities and fixture builders.
//!
//! Grids here are small enough that every strategy, iterative deepening
//! included, finishes quickly.

use parcelgrid_lib::{Coord, Grid, Scenario, Tunnel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed shared by the randomised property tests.
#[allow(dead_code)]
pub const SEED: u64 = 0x5eed_2024;

/// A `rows x columns` scenario with every edge at `level` in both
/// directions and no stores or customers yet.
#[allow(dead_code)]
pub fn uniform_scenario(rows: i32, columns: i32, level: u8) -> Scenario {
    Scenario::new(rows, columns).with_uniform_traffic(level)
}

/// A 3x3 grid whose `(0,1) -> (0,2)` edge is blocked one way only.
///
/// Going right along the top row must detour through the middle row, while
/// the return trip may use the direct edge.
#[allow(dead_code)]
pub fn one_way_block() -> Grid {
    let mut grid = Grid::uniform(3, 3, 1).expect("valid grid");
    grid.set_traffic(Coord::new(0, 1), Coord::new(0, 2), 0)
        .expect("edge in bounds");
    grid
}

/// Random symmetric grid: levels in `1..=4`, roughly one edge in eight
/// blocked, and up to `max_tunnels` tunnels with distinct entrances.
#[allow(dead_code)]
pub fn random_grid(rng: &mut StdRng, rows: i32, columns: i32, max_tunnels: usize) -> Grid {
    let mut grid = Grid::new(rows, columns).expect("valid dimensions");
    for x in 0..rows {
        for y in 0..columns {
            let here = Coord::new(x, y);
            let mut neighbours = Vec::new();
            if y + 1 < columns {
                neighbours.push(Coord::new(x, y + 1));
            }
            if x + 1 < rows {
                neighbours.push(Coord::new(x + 1, y));
            }
            for next in neighbours {
                let level = if rng.gen_ratio(1, 8) {
                    0
                } else {
                    rng.gen_range(1..=4)
                };
                grid.set_symmetric_traffic(here, next, level)
                    .expect("adjacent edge");
            }
        }
    }

    let tunnels = rng.gen_range(0..=max_tunnels);
    for _ in 0..tunnels {
        let from = random_cell(rng, rows, columns);
        let to = random_cell(rng, rows, columns);
        if from != to && !grid.is_tunnel_entrance(from) && !grid.is_tunnel_entrance(to) {
            grid.add_tunnel(Tunnel::new(from, to)).expect("tunnel in bounds");
        }
    }
    grid
}

/// Same layout as `grid` but every passable edge costs 1.
#[allow(dead_code)]
pub fn unit_cost_copy(grid: &Grid) -> Grid {
    let mut unit = Grid::new(grid.rows(), grid.columns()).expect("valid dimensions");
    for x in 0..grid.rows() {
        for y in 0..grid.columns() {
            let here = Coord::new(x, y);
            for next in [Coord::new(x, y + 1), Coord::new(x + 1, y)] {
                if !grid.contains(next) {
                    continue;
                }
                if grid.is_passable(here, next) {
                    unit.set_traffic(here, next, 1).expect("adjacent edge");
                }
                if grid.is_passable(next, here) {
                    unit.set_traffic(next, here, 1).expect("adjacent edge");
                }
            }
        }
    }
    unit
}

#[allow(dead_code)]
pub fn random_cell(rng: &mut StdRng, rows: i32, columns: i32) -> Coord {
    Coord::new(rng.gen_range(0..rows), rng.gen_range(0..columns))
}

#[allow(dead_code)]
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}
