//! Geometry primitive: [`Point`], a `(row, col)` grid coordinate.

use std::fmt;
use std::ops::{Add, Sub};

/// A grid coordinate. Rows grow downwards, columns grow to the right.
///
/// Coordinates are signed so that neighbour offsets can be applied before
/// bounds checking.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a point shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Whether `other` differs from `self` by exactly one row and one column.
    #[inline]
    pub fn is_diagonal_to(self, other: Self) -> bool {
        (self.row - other.row).abs() == 1 && (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Point::new(2, 3);
        let b = Point::new(1, -1);
        assert_eq!(a + b, Point::new(3, 2));
        assert_eq!(a - b, Point::new(1, 4));
        assert_eq!(a.shift(-2, -3), Point::ZERO);
    }

    #[test]
    fn ordering_is_row_major() {
        let mut pts = vec![Point::new(1, 0), Point::new(0, 5), Point::new(0, 1)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(0, 1), Point::new(0, 5), Point::new(1, 0)]);
    }

    #[test]
    fn diagonal_detection() {
        let p = Point::new(4, 4);
        assert!(p.is_diagonal_to(Point::new(5, 5)));
        assert!(p.is_diagonal_to(Point::new(3, 5)));
        assert!(!p.is_diagonal_to(Point::new(4, 5)));
        assert!(!p.is_diagonal_to(Point::new(6, 6)));
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(3, 7).to_string(), "(3, 7)");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::{Role, Topology};

    #[test]
    fn point_and_enums_round_trip() {
        let p = Point::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"row":3,"col":7}"#);
        assert_eq!(serde_json::from_str::<Point>(&json).unwrap(), p);

        let t: Topology = serde_json::from_str("\"FourDirectional\"").unwrap();
        assert_eq!(t, Topology::FourDirectional);
        let r: Role = serde_json::from_str("\"Barrier\"").unwrap();
        assert_eq!(r, Role::Barrier);
    }
}
