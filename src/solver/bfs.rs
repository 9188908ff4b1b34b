use grid_util::point::Point;
use log::trace;
use std::collections::VecDeque;

use crate::{routing_grid::RoutingGrid, solver::GridSolver};

/// Marks an arena slot whose cell has not been discovered.
const UNSEEN: usize = usize::MAX;

/// Breadth-first search over the 4-neighbourhood. Since every move costs the same, the first time
/// the goal leaves the queue its predecessor chain is a shortest path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn find_path(&self, grid: &RoutingGrid, start: Point, goal: Point) -> Vec<Point> {
        if !self.worth_searching(grid, start, goal) {
            return Vec::new();
        }
        let start_ix = grid.index(start);
        let goal_ix = grid.index(goal);
        // One slot per cell holding the index of the cell it was discovered from. The start
        // points to itself, which doubles as its visited mark.
        let mut parents = vec![UNSEEN; grid.cell_count()];
        parents[start_ix] = start_ix;
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let current_ix = grid.index(current);
            if current_ix == goal_ix {
                break;
            }
            for next in grid.neighbours(current) {
                let next_ix = grid.index(next);
                if parents[next_ix] == UNSEEN {
                    parents[next_ix] = current_ix;
                    queue.push_back(next);
                }
            }
        }

        if parents[goal_ix] == UNSEEN {
            trace!("{:?} not reached from {:?}", goal, start);
            return Vec::new();
        }
        let mut path = vec![goal];
        let mut ix = goal_ix;
        while ix != start_ix {
            ix = parents[ix];
            path.push(grid.point_at(ix));
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::is_valid_path;
    use crate::routing_grid::Cell;

    fn open_grid(w: usize, h: usize) -> RoutingGrid {
        RoutingGrid::from_cells(&[Cell::walkable(w - 1, h - 1)]).unwrap()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = open_grid(1, 1);
        let start = Point::new(0, 0);
        assert_eq!(BfsSolver.find_path(&grid, start, start), vec![start]);
    }

    /// Asserts that the optimal 4 step solution around the centre obstacle is found.
    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  E|
        //  ___
        let grid = RoutingGrid::from_cells(&[Cell::blocked(1, 1), Cell::walkable(2, 2)]).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let path = BfsSolver.find_path(&grid, start, end);
        assert_eq!(path.len(), 5);
        assert!(is_valid_path(&grid, start, end, &path));
    }

    #[test]
    fn straight_line() {
        let grid = open_grid(6, 1);
        let path = BfsSolver.find_path(&grid, Point::new(5, 0), Point::new(1, 0));
        let expected = (1..=5).rev().map(|x| Point::new(x, 0)).collect::<Vec<_>>();
        assert_eq!(path, expected);
    }

    /// A goal walled in on all four sides gives an empty path.
    #[test]
    fn enclosed_goal() {
        let grid = RoutingGrid::from_cells(&[
            Cell::blocked(2, 1),
            Cell::blocked(1, 2),
            Cell::blocked(3, 2),
            Cell::blocked(2, 3),
            Cell::walkable(4, 4),
        ])
        .unwrap();
        assert!(BfsSolver
            .find_path(&grid, Point::new(0, 0), Point::new(2, 2))
            .is_empty());
        assert!(BfsSolver
            .find_path(&grid, Point::new(2, 2), Point::new(0, 0))
            .is_empty());
    }

    #[test]
    fn blocked_goal() {
        let grid = RoutingGrid::from_cells(&[Cell::blocked(2, 2)]).unwrap();
        assert!(BfsSolver
            .find_path(&grid, Point::new(0, 0), Point::new(2, 2))
            .is_empty());
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let grid = open_grid(3, 3);
        assert!(BfsSolver
            .find_path(&grid, Point::new(0, 0), Point::new(3, 0))
            .is_empty());
        assert!(BfsSolver
            .find_path(&grid, Point::new(-1, 0), Point::new(1, 1))
            .is_empty());
    }

    /// Winding corridor: the only route snakes through the gaps.
    #[test]
    fn snake_corridor() {
        // |S....|
        // |####.|
        // |.....|
        // |.####|
        // |....E|
        let mut cells = vec![Cell::walkable(4, 4)];
        cells.extend((0..4).map(|x| Cell::blocked(x, 1)));
        cells.extend((1..5).map(|x| Cell::blocked(x, 3)));
        let grid = RoutingGrid::from_cells(&cells).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(4, 4);
        let path = BfsSolver.find_path(&grid, start, end);
        assert_eq!(path.len(), 17);
        assert!(is_valid_path(&grid, start, end, &path));
    }

    #[test]
    fn repeated_queries_agree() {
        let grid = RoutingGrid::from_cells(&[Cell::blocked(1, 1), Cell::walkable(4, 4)]).unwrap();
        let a = BfsSolver.find_path(&grid, Point::new(0, 0), Point::new(4, 3));
        let b = BfsSolver.find_path(&grid, Point::new(0, 0), Point::new(4, 3));
        assert_eq!(a, b);
        assert_eq!(BfsSolver.path_len(&grid, Point::new(0, 0), Point::new(4, 3)), 8);
    }
}
