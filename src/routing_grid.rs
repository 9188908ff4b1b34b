use crate::error::{RouteError, RouteResult};
use crate::NEIGHBOUR_OFFSETS;
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// One input cell of a map: its coordinate and whether it is blocked by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub blocked: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize, blocked: bool) -> Cell {
        Cell { x, y, blocked }
    }
    pub fn walkable(x: usize, y: usize) -> Cell {
        Cell::new(x, y, false)
    }
    pub fn blocked(x: usize, y: usize) -> Cell {
        Cell::new(x, y, true)
    }
    /// Grid point of the cell. Coordinates must stay below [i32::MAX] so that every
    /// neighbour of an addressable cell is addressable too.
    pub fn point(&self) -> RouteResult<Point> {
        match (i32::try_from(self.x), i32::try_from(self.y)) {
            (Ok(x), Ok(y)) if x < i32::MAX && y < i32::MAX => Ok(Point::new(x, y)),
            _ => Err(RouteError::CoordinateOverflow {
                x: self.x,
                y: self.y,
            }),
        }
    }
}

/// Immutable occupancy grid used by all searches of a query. Blocked cells are stored as [true]
/// in the underlying [BoolGrid]. The 4-connected components of the walkable cells are computed
/// once at construction using a [UnionFind] so that disconnected queries can be rejected
/// without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct RoutingGrid {
    width: usize,
    height: usize,
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl RoutingGrid {
    /// Builds a grid sized one past the largest x and y in `cells`. Coordinates that do not appear
    /// in the input are walkable. Cells whose coordinates do not fit a [Point] are rejected
    /// before anything is allocated.
    pub fn from_cells(cells: &[Cell]) -> RouteResult<RoutingGrid> {
        let points = cells
            .iter()
            .map(|c| c.point().map(|p| (p, c.blocked)))
            .collect::<RouteResult<Vec<_>>>()?;
        let max_x = cells.iter().map(|c| c.x).max().ok_or(RouteError::EmptyGridInput)?;
        let max_y = cells.iter().map(|c| c.y).max().ok_or(RouteError::EmptyGridInput)?;
        let (width, height) = (max_x + 1, max_y + 1);
        let cell_count = width.checked_mul(height).ok_or(RouteError::CoordinateOverflow {
            x: max_x,
            y: max_y,
        })?;
        let mut grid = BoolGrid::new(width, height, false);
        for (point, _) in points.iter().filter(|(_, blocked)| *blocked) {
            grid.set_point(*point, true);
        }
        let mut routing_grid = RoutingGrid {
            width,
            height,
            grid,
            components: UnionFind::new(cell_count),
        };
        routing_grid.generate_components();
        debug!(
            "Built {}x{} grid from {} cells",
            width,
            height,
            cells.len()
        );
        Ok(routing_grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Number of cells, which bounds the length of any simple path.
    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }
    pub fn is_blocked(&self, point: Point) -> bool {
        self.in_bounds(point) && self.grid.get_point(point)
    }
    pub fn is_walkable(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.grid.get_point(point)
    }

    /// Fails with [RouteError::OutOfBounds] if the point does not address a cell of this grid.
    pub fn check_point(&self, point: Point) -> RouteResult<()> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(RouteError::OutOfBounds {
                point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Row-major index of an in-bounds point.
    pub(crate) fn index(&self, point: Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }
    pub(crate) fn point_at(&self, ix: usize) -> Point {
        Point::new((ix % self.width()) as i32, (ix / self.width()) as i32)
    }

    /// Walkable 4-neighbours of `point`, always enumerated in the order of [NEIGHBOUR_OFFSETS].
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.is_walkable(*p))
            .collect()
    }

    /// Checks if start and goal are walkable cells of the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        self.is_walkable(start)
            && self.is_walkable(goal)
            && self
                .components
                .equiv(self.index(start), self.index(goal))
    }

    /// Checks if start and goal are walkable cells of different components. Unlike
    /// `!reachable`, this is false whenever either point is blocked or out of bounds, since
    /// components say nothing about such points.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        self.is_walkable(start)
            && self.is_walkable(goal)
            && !self
                .components
                .equiv(self.index(start), self.index(goal))
    }

    /// Links up walkable grid neighbours into the same components. Only the right and lower
    /// neighbour need to be joined for every cell to cover all 4-adjacencies.
    fn generate_components(&mut self) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        for y in 0..h {
            for x in 0..w {
                let point = Point::new(x, y);
                if !self.is_walkable(point) {
                    continue;
                }
                let ix = self.index(point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_walkable(n) {
                        let n_ix = self.index(n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for RoutingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| if self.is_blocked(Point::new(x, y)) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
