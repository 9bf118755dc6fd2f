//! Admissible cost-to-go estimates for grid deliveries.
//!
//! Both heuristics are retargeted in place by the owning
//! [`DeliveryProblem`](crate::delivery::DeliveryProblem) before each query.

use crate::grid::{Coord, Tunnel};
use crate::problem::Heuristic;

/// Lower bound on any movement edge cost assumed by
/// [`TrafficAwareHeuristic`].
pub const DEFAULT_MIN_TRAFFIC: u32 = 1;

/// Chained two-tunnel templates are only considered beyond this distance.
pub const DOUBLE_TUNNEL_THRESHOLD: u32 = 10;

/// Manhattan distance to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManhattanHeuristic {
    goal: Coord,
}

impl ManhattanHeuristic {
    pub fn new(goal: Coord) -> Self {
        Self { goal }
    }

    pub fn retarget(&mut self, goal: Coord) {
        self.goal = goal;
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }
}

impl Heuristic<Coord> for ManhattanHeuristic {
    fn estimate(&self, state: &Coord) -> f64 {
        f64::from(state.manhattan(self.goal))
    }
}

/// Tunnel-aware estimate: the cheapest of walking directly, taking one
/// tunnel, or (for long distances) chaining two tunnels, with every walked
/// step priced at `min_traffic`.
///
/// With `min_traffic == 1` every template is bounded below by the plain
/// Manhattan distance, so the estimate stays admissible on any grid whose
/// passable edges cost at least one.
#[derive(Debug, Clone)]
pub struct TrafficAwareHeuristic<'g> {
    goal: Coord,
    tunnels: &'g [Tunnel],
    min_traffic: u32,
}

impl<'g> TrafficAwareHeuristic<'g> {
    pub fn new(goal: Coord, tunnels: &'g [Tunnel]) -> Self {
        Self {
            goal,
            tunnels,
            min_traffic: DEFAULT_MIN_TRAFFIC,
        }
    }

    pub fn with_min_traffic(mut self, min_traffic: u32) -> Self {
        self.min_traffic = min_traffic;
        self
    }

    pub fn retarget(&mut self, goal: Coord) {
        self.goal = goal;
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn min_traffic(&self) -> u32 {
        self.min_traffic
    }

    fn walk(&self, from: Coord, to: Coord) -> u64 {
        u64::from(from.manhattan(to)) * u64::from(self.min_traffic)
    }

    /// Cheapest route `state -> entrance -> (tunnel) -> exit -> goal` over
    /// both orientations of every tunnel.
    fn single_tunnel(&self, state: Coord) -> Option<u64> {
        self.tunnels
            .iter()
            .flat_map(|t| [(t.from, t.to), (t.to, t.from)])
            .map(|(entry, exit)| {
                self.walk(state, entry)
                    + u64::from(entry.manhattan(exit))
                    + self.walk(exit, self.goal)
            })
            .min()
    }

    /// Cheapest route through two distinct tunnels in sequence, over every
    /// ordered pair and all four orientation combinations.
    fn double_tunnel(&self, state: Coord) -> Option<u64> {
        let mut best: Option<u64> = None;
        for (i, first) in self.tunnels.iter().enumerate() {
            for (j, second) in self.tunnels.iter().enumerate() {
                if i == j {
                    continue;
                }
                for (a_in, a_out) in [(first.from, first.to), (first.to, first.from)] {
                    for (b_in, b_out) in [(second.from, second.to), (second.to, second.from)] {
                        let cost = self.walk(state, a_in)
                            + u64::from(first.cost())
                            + self.walk(a_out, b_in)
                            + u64::from(second.cost())
                            + self.walk(b_out, self.goal);
                        best = Some(best.map_or(cost, |b| b.min(cost)));
                    }
                }
            }
        }
        best
    }
}

impl Heuristic<Coord> for TrafficAwareHeuristic<'_> {
    fn estimate(&self, state: &Coord) -> f64 {
        let direct = self.walk(*state, self.goal);
        if self.tunnels.is_empty() {
            return direct as f64;
        }

        let mut best = direct;
        if let Some(cost) = self.single_tunnel(*state) {
            best = best.min(cost);
        }
        if self.tunnels.len() >= 2 && state.manhattan(self.goal) > DOUBLE_TUNNEL_THRESHOLD {
            if let Some(cost) = self.double_tunnel(*state) {
                best = best.min(cost);
            }
        }
        best as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_zero_at_goal() {
        let mut h = ManhattanHeuristic::new(Coord::new(2, 3));
        assert_eq!(h.estimate(&Coord::new(2, 3)), 0.0);
        assert_eq!(h.estimate(&Coord::new(0, 0)), 5.0);

        h.retarget(Coord::new(0, 0));
        assert_eq!(h.goal(), Coord::new(0, 0));
        assert_eq!(h.estimate(&Coord::new(0, 0)), 0.0);
    }

    #[test]
    fn traffic_aware_without_tunnels_scales_manhattan() {
        let h = TrafficAwareHeuristic::new(Coord::new(4, 4), &[]).with_min_traffic(2);
        assert_eq!(h.estimate(&Coord::new(0, 0)), 16.0);
    }

    #[test]
    fn tunnel_template_undercuts_scaled_walk() {
        // Walking (0,0) -> (0,9) at min traffic 3 costs 27; the tunnel costs
        // its own length 9 plus nothing on either side.
        let tunnels = [Tunnel::new(Coord::new(0, 0), Coord::new(0, 9))];
        let h = TrafficAwareHeuristic::new(Coord::new(0, 9), &tunnels).with_min_traffic(3);
        assert_eq!(h.estimate(&Coord::new(0, 0)), 9.0);
        // One step off the entrance adds one walked step.
        assert_eq!(h.estimate(&Coord::new(1, 0)), 12.0);
    }

    #[test]
    fn default_min_traffic_never_exceeds_manhattan() {
        let tunnels = [
            Tunnel::new(Coord::new(0, 0), Coord::new(7, 7)),
            Tunnel::new(Coord::new(8, 0), Coord::new(0, 12)),
        ];
        let goal = Coord::new(11, 11);
        let aware = TrafficAwareHeuristic::new(goal, &tunnels);
        let manhattan = ManhattanHeuristic::new(goal);
        for x in 0..12 {
            for y in 0..12 {
                let at = Coord::new(x, y);
                assert!(aware.estimate(&at) <= manhattan.estimate(&at));
            }
        }
    }

    #[test]
    fn double_tunnel_chain_applies_beyond_threshold() {
        // Goal 14 away; entering a tunnel at the start and a second one at
        // the first exit beats walking at min traffic 4.
        let tunnels = [
            Tunnel::new(Coord::new(0, 0), Coord::new(0, 7)),
            Tunnel::new(Coord::new(0, 7), Coord::new(0, 14)),
        ];
        let h = TrafficAwareHeuristic::new(Coord::new(0, 14), &tunnels).with_min_traffic(4);
        assert_eq!(h.single_tunnel(Coord::new(0, 0)), Some(7 + 7 * 4));
        assert_eq!(h.estimate(&Coord::new(0, 0)), 14.0);
    }
}
