//! Grid and cost model: coordinates, actions, tunnels and the directional
//! traffic map consumed by the delivery problem.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest traffic level an edge may carry.
pub const MAX_TRAFFIC_LEVEL: u8 = 4;

/// A cell on the grid. `x` indexes rows and `y` indexes columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The cell reached by a movement action. `None` for [`Action::Tunnel`].
    pub fn step(self, action: Action) -> Option<Coord> {
        let (dx, dy) = action.delta()?;
        Some(Coord::new(self.x + dx, self.y + dy))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = Error;

    /// Parse `x,y`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed.split(',').map(str::trim);
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::MalformedScenario {
                message: format!("expected coordinate as 'x,y', got '{s}'"),
            });
        };
        let parse = |raw: &str| {
            raw.parse::<i32>().map_err(|_| Error::MalformedScenario {
                message: format!("invalid coordinate component '{raw}' in '{s}'"),
            })
        };
        Ok(Coord::new(parse(x)?, parse(y)?))
    }
}

/// Moves available to a truck. The declaration order is the order in which
/// [`Problem::actions`](crate::problem::Problem::actions) offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Tunnel,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Tunnel,
    ];

    pub const MOVES: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Row/column offset of a movement action.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Action::Up => Some((-1, 0)),
            Action::Down => Some((1, 0)),
            Action::Left => Some((0, -1)),
            Action::Right => Some((0, 1)),
            Action::Tunnel => None,
        }
    }

    /// The movement that undoes this one. Tunnels have no geometric inverse.
    pub fn inverse(self) -> Option<Action> {
        match self {
            Action::Up => Some(Action::Down),
            Action::Down => Some(Action::Up),
            Action::Left => Some(Action::Right),
            Action::Right => Some(Action::Left),
            Action::Tunnel => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Tunnel => "tunnel",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAction {
                name: s.to_string(),
            })
    }
}

/// A bidirectional shortcut between two cells. `(a, b)` and `(b, a)` are the
/// same tunnel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tunnel {
    pub from: Coord,
    pub to: Coord,
}

impl Tunnel {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// Cost of travelling through the tunnel: the Manhattan distance between
    /// its entrances.
    pub fn cost(&self) -> u32 {
        self.from.manhattan(self.to)
    }

    pub fn is_entrance(&self, at: Coord) -> bool {
        at == self.from || at == self.to
    }

    /// The opposite entrance, or `None` when `at` is not an entrance.
    pub fn other_end(&self, at: Coord) -> Option<Coord> {
        if at == self.from {
            Some(self.to)
        } else if at == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    fn ordered(&self) -> (Coord, Coord) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

impl PartialEq for Tunnel {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Eq for Tunnel {}

impl Hash for Tunnel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

impl fmt::Display for Tunnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}

/// Bounded grid with a directional traffic map and a tunnel list.
///
/// Traffic lookups are always `from -> to`; a reverse entry is only present if
/// it was inserted. Level 0 and absence both mean the edge is blocked. The
/// adjacency and tunnels sit behind `Arc`s so per-worker clones are cheap.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    columns: i32,
    traffic: Arc<HashMap<Coord, HashMap<Coord, u8>>>,
    tunnels: Arc<Vec<Tunnel>>,
}

impl Grid {
    /// Create an empty grid with no passable edges.
    pub fn new(rows: i32, columns: i32) -> Result<Self> {
        if rows <= 0 || columns <= 0 {
            return Err(Error::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            traffic: Arc::new(HashMap::new()),
            tunnels: Arc::new(Vec::new()),
        })
    }

    /// Create a grid where every pair of adjacent cells is joined in both
    /// directions at the same traffic level.
    pub fn uniform(rows: i32, columns: i32, level: u8) -> Result<Self> {
        let mut grid = Self::new(rows, columns)?;
        for x in 0..rows {
            for y in 0..columns {
                let here = Coord::new(x, y);
                if y + 1 < columns {
                    grid.set_symmetric_traffic(here, Coord::new(x, y + 1), level)?;
                }
                if x + 1 < rows {
                    grid.set_symmetric_traffic(here, Coord::new(x + 1, y), level)?;
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn contains(&self, at: Coord) -> bool {
        (0..self.rows).contains(&at.x) && (0..self.columns).contains(&at.y)
    }

    /// Reject coordinates outside the grid.
    pub fn check_bounds(&self, at: Coord, context: &'static str) -> Result<()> {
        if self.contains(at) {
            Ok(())
        } else {
            Err(Error::CoordinateOutOfBounds {
                coord: at,
                rows: self.rows,
                columns: self.columns,
                context,
            })
        }
    }

    /// Insert or overwrite the directional edge `from -> to`.
    pub fn set_traffic(&mut self, from: Coord, to: Coord, level: u8) -> Result<()> {
        self.check_bounds(from, "traffic edge source")?;
        self.check_bounds(to, "traffic edge target")?;
        if from.manhattan(to) != 1 {
            return Err(Error::NonAdjacentEdge { from, to });
        }
        if level > MAX_TRAFFIC_LEVEL {
            return Err(Error::TrafficOutOfRange { from, to, level });
        }
        Arc::make_mut(&mut self.traffic)
            .entry(from)
            .or_default()
            .insert(to, level);
        Ok(())
    }

    /// Insert both `a -> b` and `b -> a` at the same level.
    pub fn set_symmetric_traffic(&mut self, a: Coord, b: Coord, level: u8) -> Result<()> {
        self.set_traffic(a, b, level)?;
        self.set_traffic(b, a, level)
    }

    pub fn add_tunnel(&mut self, tunnel: Tunnel) -> Result<()> {
        self.check_bounds(tunnel.from, "tunnel entrance")?;
        self.check_bounds(tunnel.to, "tunnel entrance")?;
        if tunnel.from == tunnel.to {
            return Err(Error::DegenerateTunnel { at: tunnel.from });
        }
        let tunnels = Arc::make_mut(&mut self.tunnels);
        if !tunnels.contains(&tunnel) {
            tunnels.push(tunnel);
        }
        Ok(())
    }

    /// Traffic level of the directional edge, if one was recorded.
    pub fn traffic(&self, from: Coord, to: Coord) -> Option<u8> {
        self.traffic.get(&from)?.get(&to).copied()
    }

    /// Whether `from -> to` exists with a strictly positive level.
    pub fn is_passable(&self, from: Coord, to: Coord) -> bool {
        self.traffic(from, to).is_some_and(|level| level > 0)
    }

    pub fn tunnels(&self) -> &[Tunnel] {
        &self.tunnels
    }

    /// Exit of the first tunnel that has `at` as an entrance.
    pub fn tunnel_exit(&self, at: Coord) -> Option<Coord> {
        self.tunnels.iter().find_map(|tunnel| tunnel.other_end(at))
    }

    pub fn is_tunnel_entrance(&self, at: Coord) -> bool {
        self.tunnels.iter().any(|tunnel| tunnel.is_entrance(at))
    }

    /// Number of recorded directional edges, blocked ones included.
    pub fn edge_count(&self) -> usize {
        self.traffic.values().map(HashMap::len).sum()
    }

    /// Lowest strictly positive traffic level on the grid.
    pub fn min_traffic_level(&self) -> Option<u8> {
        self.traffic
            .values()
            .flat_map(HashMap::values)
            .copied()
            .filter(|level| *level > 0)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunnel_equality_is_symmetric() {
        let a = Coord::new(0, 0);
        let b = Coord::new(4, 4);
        assert_eq!(Tunnel::new(a, b), Tunnel::new(b, a));
        assert_eq!(Tunnel::new(a, b).cost(), 8);
    }

    #[test]
    fn tunnel_other_end() {
        let tunnel = Tunnel::new(Coord::new(1, 1), Coord::new(3, 2));
        assert_eq!(tunnel.other_end(Coord::new(1, 1)), Some(Coord::new(3, 2)));
        assert_eq!(tunnel.other_end(Coord::new(3, 2)), Some(Coord::new(1, 1)));
        assert_eq!(tunnel.other_end(Coord::new(0, 0)), None);
    }

    #[test]
    fn uniform_grid_is_symmetric() {
        let grid = Grid::uniform(3, 3, 2).unwrap();
        // 12 undirected edges on a 3x3 lattice
        assert_eq!(grid.edge_count(), 24);
        assert_eq!(grid.traffic(Coord::new(0, 0), Coord::new(0, 1)), Some(2));
        assert_eq!(grid.traffic(Coord::new(0, 1), Coord::new(0, 0)), Some(2));
        assert_eq!(grid.min_traffic_level(), Some(2));
    }

    #[test]
    fn directional_override_blocks_one_way() {
        let mut grid = Grid::uniform(2, 2, 1).unwrap();
        grid.set_traffic(Coord::new(0, 0), Coord::new(0, 1), 0).unwrap();
        assert!(!grid.is_passable(Coord::new(0, 0), Coord::new(0, 1)));
        assert!(grid.is_passable(Coord::new(0, 1), Coord::new(0, 0)));
    }

    #[test]
    fn rejects_out_of_range_traffic() {
        let mut grid = Grid::new(2, 2).unwrap();
        let err = grid
            .set_traffic(Coord::new(0, 0), Coord::new(1, 0), 5)
            .unwrap_err();
        assert!(matches!(err, Error::TrafficOutOfRange { level: 5, .. }));
    }

    #[test]
    fn rejects_non_adjacent_edges_and_bad_dimensions() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.set_traffic(Coord::new(0, 0), Coord::new(1, 1), 1),
            Err(Error::NonAdjacentEdge { .. })
        ));
        assert!(matches!(
            Grid::new(0, 3),
            Err(Error::InvalidDimensions { rows: 0, columns: 3 })
        ));
    }

    #[test]
    fn duplicate_tunnels_are_ignored() {
        let mut grid = Grid::new(5, 5).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(4, 4);
        grid.add_tunnel(Tunnel::new(a, b)).unwrap();
        grid.add_tunnel(Tunnel::new(b, a)).unwrap();
        assert_eq!(grid.tunnels().len(), 1);
        assert_eq!(grid.tunnel_exit(b), Some(a));
        assert!(matches!(
            grid.add_tunnel(Tunnel::new(a, a)),
            Err(Error::DegenerateTunnel { .. })
        ));
    }

    #[test]
    fn coord_parses_with_or_without_parens() {
        assert_eq!("2,3".parse::<Coord>().unwrap(), Coord::new(2, 3));
        assert_eq!("(2, 3)".parse::<Coord>().unwrap(), Coord::new(2, 3));
        assert!("2;3".parse::<Coord>().is_err());
        assert!("2,3,4".parse::<Coord>().is_err());
    }

    #[test]
    fn action_round_trips_through_strings() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
        assert_eq!(Action::Up.inverse(), Some(Action::Down));
        assert_eq!(Action::Tunnel.inverse(), None);
    }
}
