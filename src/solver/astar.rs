use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{routing_grid::RoutingGrid, search::astar, solver::GridSolver, STEP_COST};

/// A* over the 4-neighbourhood with a scaled
/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic. A factor of
/// 1.0 gives optimal paths faster than breadth-first search on open maps, a factor of 0.0 turns
/// it into uniform-cost search. Factors above 1.0 trade optimality for speed.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
    /// Plain uniform-cost search, an independent reference for breadth-first search results.
    pub fn uniform_cost() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 0.0,
        }
    }

    /// Just the move cost times the heuristic factor.
    fn heuristic(&self, p1: &Point, p2: &Point) -> u32 {
        (p1.manhattan_distance(p2) as f32 * STEP_COST as f32 * self.heuristic_factor) as u32
    }
}

impl GridSolver for AstarSolver {
    fn find_path(&self, grid: &RoutingGrid, start: Point, goal: Point) -> Vec<Point> {
        if !self.worth_searching(grid, start, goal) {
            return Vec::new();
        }
        astar(
            &start,
            |node| {
                grid.neighbours(*node)
                    .into_iter()
                    .map(|p| (p, STEP_COST))
                    .collect::<SmallVec<[_; 4]>>()
            },
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(path, _cost)| path)
        .unwrap_or_default()
    }
}
