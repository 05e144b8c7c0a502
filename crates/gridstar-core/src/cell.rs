//! The [`Cell`] type — a grid square with a [`Role`] and an adjacency list.

use std::hash::{Hash, Hasher};

use crate::geom::Point;
use crate::topology::Topology;

/// What a cell is used for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
}

impl Role {
    /// Whether the cell can be entered.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }
}

/// A single grid square.
///
/// Identity is the coordinate: two cells compare equal (and hash the same)
/// iff their positions match, regardless of role or adjacency.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) pos: Point,
    pub(crate) role: Role,
    pub(crate) neighbors: Vec<Point>,
    // (topology, grid revision) the adjacency list was last resolved for
    pub(crate) refreshed: Option<(Topology, u64)>,
}

impl Cell {
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pos,
            role: Role::Empty,
            neighbors: Vec::new(),
            refreshed: None,
        }
    }

    /// Coordinates of this cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Current role.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }

    /// Traversable neighbours as of the last refresh.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}
