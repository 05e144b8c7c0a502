//! The [`Grid`] type — a square arena of [`Cell`]s addressed by coordinate.
//!
//! The grid is the only owner of its cells. Everything else (search state,
//! renderers) refers to cells by [`Point`] or by flat index, so there is no
//! aliasing of cell objects.

use std::fmt;

use crate::cell::{Cell, Role};
use crate::geom::Point;
use crate::topology::Topology;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors reported by grid edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside `[0, size)²`.
    OutOfBounds(Point),
    /// The requested role would break the single-start / single-end rule or
    /// would overwrite an endpoint. The grid is left unchanged.
    RoleConflict {
        pos: Point,
        requested: Role,
        occupied_by: Point,
    },
    /// The requested side length exceeds [`Grid::MAX_SIZE`].
    TooLarge(usize),
    /// An ASCII grid description could not be parsed.
    Parse(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "grid: cell {p} is out of bounds"),
            Self::RoleConflict {
                pos,
                requested,
                occupied_by,
            } => {
                if pos == occupied_by {
                    write!(f, "grid: cannot mark endpoint {pos} as {requested:?}")
                } else {
                    write!(
                        f,
                        "grid: cannot mark {pos} as {requested:?}, already set at {occupied_by}"
                    )
                }
            }
            Self::TooLarge(size) => write!(
                f,
                "grid: side length {size} exceeds the maximum of {}",
                Grid::MAX_SIZE
            ),
            Self::Parse(msg) => write!(f, "grid: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An `N×N` grid of cells, `N` fixed at construction.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    size: usize,
    start: Option<Point>,
    end: Option<Point>,
    // bumped whenever a cell enters or leaves `Barrier`
    revision: u64,
    // most recent refresh stamp, and how many cells carry it
    fresh: Option<(Topology, u64)>,
    fresh_count: usize,
}

impl Grid {
    /// Largest supported side length. Keeps `size²` within `i32` so that
    /// every coordinate and flat index converts without loss.
    pub const MAX_SIZE: usize = 46_340;

    /// Create a `size×size` grid of empty cells.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds [`MAX_SIZE`](Self::MAX_SIZE). Use
    /// [`try_new`](Self::try_new) for sizes that come from user input.
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a `size×size` grid of empty cells, or fail with
    /// [`GridError::TooLarge`].
    pub fn try_new(size: usize) -> Result<Self, GridError> {
        if size > Self::MAX_SIZE {
            return Err(GridError::TooLarge(size));
        }
        // lossless: size² <= i32::MAX
        let cells = (0..size * size)
            .map(|i| Cell::new(Point::new((i / size) as i32, (i % size) as i32)))
            .collect();
        Ok(Self {
            cells,
            size,
            start: None,
            end: None,
            revision: 0,
            fresh: None,
            fresh_count: 0,
        })
    }

    /// Parse a square grid from ASCII rows: `.` empty, `#` barrier,
    /// `S` start, `E` end. Blank lines and surrounding whitespace are
    /// ignored.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        let mut grid = Self::try_new(size)?;
        for (r, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(GridError::Parse(format!(
                    "row {r} has {width} cells, expected {size}"
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                let role = match ch {
                    '.' => continue,
                    '#' => Role::Barrier,
                    'S' => Role::Start,
                    'E' => Role::End,
                    _ => {
                        return Err(GridError::Parse(format!(
                            "invalid cell {ch:?} at row {r}, col {c}"
                        )));
                    }
                };
                grid.set_role(Point::new(r as i32, c as i32), role)?;
            }
        }
        Ok(grid)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.size && (p.col as usize) < self.size
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.size + p.col as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx / self.size) as i32, (idx % self.size) as i32)
    }

    /// The cell at `p`, if in bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Role of the cell at `p`, if in bounds.
    #[inline]
    pub fn role(&self, p: Point) -> Option<Role> {
        self.cell(p).map(Cell::role)
    }

    /// Whether `p` is an in-bounds barrier.
    #[inline]
    pub fn is_barrier(&self, p: Point) -> bool {
        self.role(p) == Some(Role::Barrier)
    }

    /// Whether `p` is in bounds and not a barrier.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.role(p).is_some_and(Role::is_passable)
    }

    /// The start cell, if one is marked.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The end cell, if one is marked.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Assign `role` to the cell at `p`.
    ///
    /// Fails with [`GridError::RoleConflict`] (and changes nothing) when
    /// marking a second start or end, when turning an endpoint into a
    /// barrier, or when swapping an endpoint for the other endpoint.
    /// Re-assigning the role a cell already has is a no-op. Assigning
    /// [`Role::Empty`] is the same as [`reset`](Self::reset).
    pub fn set_role(&mut self, p: Point, role: Role) -> Result<(), GridError> {
        let i = self.idx(p).ok_or(GridError::OutOfBounds(p))?;
        let current = self.cells[i].role;
        if current == role {
            return Ok(());
        }

        let conflict = |occupied_by| GridError::RoleConflict {
            pos: p,
            requested: role,
            occupied_by,
        };
        match role {
            Role::Empty => {}
            Role::Start => {
                if let Some(s) = self.start {
                    return Err(conflict(s));
                }
                if current == Role::End {
                    return Err(conflict(p));
                }
            }
            Role::End => {
                if let Some(e) = self.end {
                    return Err(conflict(e));
                }
                if current == Role::Start {
                    return Err(conflict(p));
                }
            }
            Role::Barrier => {
                if matches!(current, Role::Start | Role::End) {
                    return Err(conflict(p));
                }
            }
        }

        self.write_role(i, role);
        Ok(())
    }

    /// Clear the cell at `p` back to [`Role::Empty`], whatever it was.
    pub fn reset(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.idx(p).ok_or(GridError::OutOfBounds(p))?;
        self.write_role(i, Role::Empty);
        Ok(())
    }

    /// Reset every cell to [`Role::Empty`].
    pub fn clear(&mut self) {
        for i in 0..self.cells.len() {
            self.write_role(i, Role::Empty);
        }
    }

    fn write_role(&mut self, i: usize, role: Role) {
        let cell = &mut self.cells[i];
        let old = cell.role;
        if old == role {
            return;
        }
        cell.role = role;
        let p = cell.pos;

        match old {
            Role::Start => self.start = None,
            Role::End => self.end = None,
            _ => {}
        }
        match role {
            Role::Start => self.start = Some(p),
            Role::End => self.end = Some(p),
            _ => {}
        }
        if old == Role::Barrier || role == Role::Barrier {
            self.revision = self.revision.wrapping_add(1);
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Traversable neighbours of `p` as of the last refresh. Empty if `p` is
    /// out of bounds.
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Point] {
        self.cell(p).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Replace the adjacency list of `p`, recording that it was resolved
    /// under `topology` against the current barrier layout. No-op if `p` is
    /// out of bounds.
    ///
    /// Intended for the neighbour resolver.
    pub fn set_neighbors(&mut self, p: Point, neighbors: Vec<Point>, topology: Topology) {
        let Some(i) = self.idx(p) else {
            return;
        };
        let stamp = (topology, self.revision);
        let cell = &mut self.cells[i];
        cell.neighbors = neighbors;
        if cell.refreshed == Some(stamp) {
            return;
        }
        cell.refreshed = Some(stamp);

        if self.fresh == Some(stamp) {
            self.fresh_count += 1;
        } else {
            // cells may still carry this stamp from an earlier pass
            self.fresh = Some(stamp);
            self.fresh_count = self
                .cells
                .iter()
                .filter(|c| c.refreshed == Some(stamp))
                .count();
        }
    }

    /// Whether every cell's adjacency was resolved for `topology` after the
    /// last barrier edit, and no cell has since been resolved for another
    /// topology.
    #[inline]
    pub fn adjacency_current(&self, topology: Topology) -> bool {
        !self.cells.is_empty()
            && self.fresh == Some((topology, self.revision))
            && self.fresh_count == self.cells.len()
    }

    /// Barrier-layout revision counter.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}
