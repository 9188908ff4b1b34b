//! Helpers for working with paths as produced by the solvers and the optimizer.
use crate::routing_grid::RoutingGrid;
use grid_util::point::Point;

/// Checks if two points are 4-neighbours.
pub fn adjacent(a: &Point, b: &Point) -> bool {
    a.manhattan_distance(b) == 1
}

/// Checks that a path is non-empty, runs from `start` to `goal`, only visits walkable cells and
/// only takes single axis-aligned steps.
pub fn is_valid_path(grid: &RoutingGrid, start: Point, goal: Point, path: &[Point]) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) => {
            *first == start
                && *last == goal
                && path.iter().all(|p| grid.is_walkable(*p))
                && path.windows(2).all(|w| adjacent(&w[0], &w[1]))
        }
        _ => false,
    }
}

/// Joins consecutive segments into one path. The first segment is taken whole, every further
/// segment without its first point, which repeats the last point of the segment before.
pub fn stitch<'a, I>(segments: I) -> Vec<Point>
where
    I: IntoIterator<Item = &'a [Point]>,
{
    let mut path: Vec<Point> = Vec::new();
    for segment in segments {
        if path.is_empty() {
            path.extend_from_slice(segment);
        } else {
            debug_assert_eq!(path.last(), segment.first());
            path.extend_from_slice(segment.get(1..).unwrap_or_default());
        }
    }
    path
}

/// Length of the stitched path of segments with the given vertex counts.
pub fn stitched_len<I>(segment_lens: I) -> usize
where
    I: IntoIterator<Item = usize>,
{
    segment_lens
        .into_iter()
        .enumerate()
        .map(|(i, len)| if i == 0 { len } else { len.saturating_sub(1) })
        .sum()
}
