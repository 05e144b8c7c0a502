//! Neighbour resolution under a [`Topology`].

use gridstar_core::{Grid, Point, Topology};

// (row, col) offsets, in the order candidates are listed
const ORTHOGONAL: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

const DIAGONAL: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
];

/// Compute the traversable neighbours of `p` without storing them.
///
/// Orthogonal candidates are kept when in bounds and not a barrier.
/// Diagonal candidates (8-directional only) additionally need at least one
/// of the two flanking cells, `(p.row, n.col)` and `(n.row, p.col)`, to be
/// passable: a diagonal may slip past a single obstruction but never
/// through a corner closed on both sides.
pub fn resolve(grid: &Grid, p: Point, topology: Topology) -> Vec<Point> {
    let mut out = Vec::with_capacity(8);
    if !grid.contains(p) {
        return out;
    }

    for d in ORTHOGONAL {
        let n = p + d;
        if grid.is_passable(n) {
            out.push(n);
        }
    }

    if topology.allows_diagonals() {
        for d in DIAGONAL {
            let n = p + d;
            if !grid.is_passable(n) {
                continue;
            }
            let flank_a = Point::new(p.row, n.col);
            let flank_b = Point::new(n.row, p.col);
            if grid.is_passable(flank_a) || grid.is_passable(flank_b) {
                out.push(n);
            }
        }
    }
    out
}

/// Recompute the adjacency list of the cell at `p` in place.
///
/// Once every cell has been refreshed for `topology` since the last barrier
/// edit, [`Grid::adjacency_current`] holds and a search may start.
pub fn refresh(grid: &mut Grid, p: Point, topology: Topology) {
    let neighbors = resolve(grid, p, topology);
    grid.set_neighbors(p, neighbors, topology);
}

/// Refresh every cell for `topology`. Must be called after barrier edits and
/// before a search.
pub fn refresh_all(grid: &mut Grid, topology: Topology) {
    for i in 0..grid.len() {
        let p = grid.point(i);
        refresh(grid, p, topology);
    }
    log::debug!("refreshed adjacency of {} cells ({topology})", grid.len());
}
