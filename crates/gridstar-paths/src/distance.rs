//! Heuristics and step costs.

use gridstar_core::{Point, Topology};

/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from((a.row - b.row).abs() + (a.col - b.col).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    f64::from(a.row - b.row).hypot(f64::from(a.col - b.col))
}

/// Cost of moving between adjacent cells `a` and `b`: √2 for a diagonal
/// step, 1 otherwise. Non-adjacent pairs are not priced meaningfully.
#[inline]
pub fn edge_cost(a: Point, b: Point) -> f64 {
    if a.is_diagonal_to(b) {
        DIAGONAL_COST
    } else {
        1.0
    }
}

/// Admissible estimate of the remaining cost from `p` to `end`.
#[inline]
pub fn heuristic(p: Point, end: Point, topology: Topology) -> f64 {
    match topology {
        Topology::FourDirectional => manhattan(p, end),
        Topology::EightDirectional => euclidean(p, end),
    }
}

/// Total cost of walking `path` step by step.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2).map(|w| edge_cost(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_costs() {
        let p = Point::new(3, 3);
        assert_eq!(edge_cost(p, Point::new(3, 4)), 1.0);
        assert_eq!(edge_cost(p, Point::new(2, 3)), 1.0);
        assert_eq!(edge_cost(p, Point::new(4, 4)), DIAGONAL_COST);
        assert_eq!(edge_cost(p, Point::new(2, 4)), DIAGONAL_COST);
    }

    #[test]
    fn heuristics_follow_topology() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(heuristic(a, b, Topology::FourDirectional), 7.0);
        assert_eq!(heuristic(a, b, Topology::EightDirectional), 5.0);
        assert_eq!(heuristic(b, b, Topology::EightDirectional), 0.0);
    }

    #[test]
    fn euclidean_never_exceeds_octile_cost() {
        // octile distance is the true cost on an open 8-directional grid
        for dr in 0..10 {
            for dc in 0..10 {
                let (lo, hi) = (dr.min(dc), dr.max(dc));
                let octile = f64::from(lo) * DIAGONAL_COST + f64::from(hi - lo);
                let h = euclidean(Point::ZERO, Point::new(dr, dc));
                assert!(h <= octile + 1e-12, "({dr}, {dc}): {h} > {octile}");
            }
        }
    }

    #[test]
    fn path_cost_sums_steps() {
        let path = [
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(2, 3),
        ];
        assert!((path_cost(&path) - (1.0 + 2.0 * DIAGONAL_COST)).abs() < 1e-12);
        assert_eq!(path_cost(&path[..1]), 0.0);
        assert_eq!(path_cost(&[]), 0.0);
    }
}
