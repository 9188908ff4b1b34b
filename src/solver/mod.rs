use crate::routing_grid::RoutingGrid;
use grid_util::point::Point;
use log::warn;

pub mod astar;
pub mod bfs;

/// A shortest-path algorithm on a [RoutingGrid]. Solvers are stateless with respect to a query:
/// all scratch memory lives inside one call, so a solver can be shared between threads.
pub trait GridSolver: Sync {
    /// Computes a shortest 4-connected path from start to goal, both included. An empty path means
    /// the goal cannot be reached from the start; this is an ordinary outcome, not an error.
    fn find_path(&self, grid: &RoutingGrid, start: Point, goal: Point) -> Vec<Point>;

    /// Vertex count of [find_path](Self::find_path), 0 if unreachable.
    fn path_len(&self, grid: &RoutingGrid, start: Point, goal: Point) -> usize {
        self.find_path(grid, start, goal).len()
    }

    /// Shared preconditions of every solver: both endpoints must lie on the grid, and endpoints in
    /// different connected components need no search at all. Returns [false] if the search can be
    /// skipped.
    fn worth_searching(&self, grid: &RoutingGrid, start: Point, goal: Point) -> bool {
        if !grid.in_bounds(start) || !grid.in_bounds(goal) {
            warn!("Path query {:?} -> {:?} leaves the grid", start, goal);
            return false;
        }
        // Check if start and goal are on different connected components.
        !grid.unreachable(start, goal)
    }
}
