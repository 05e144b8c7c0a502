//! The resumable A* driver: [`SearchEngine`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridstar_core::{Grid, Point, Topology};

use crate::distance::{edge_cost, heuristic};
use crate::error::SearchError;
use crate::path::reconstruct;

/// Lifecycle of a [`SearchEngine`]. `Found` and `Exhausted` are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    Uninitialized,
    Running,
    Found,
    Exhausted,
}

impl SearchState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Per-cell observation marker for renderers. Never read by the search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    #[default]
    Unvisited,
    /// Discovered and waiting in the open set.
    Frontier,
    /// Popped and expanded.
    Expanded,
    /// On the reconstructed path.
    Path,
}

// ---------------------------------------------------------------------------
// Internal node / open-set entry
// ---------------------------------------------------------------------------

const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
struct Node {
    g: f64,
    f: f64,
    parent: usize,
    // sequence number of the newest open-set entry for this cell
    seq: u64,
    open: bool,
    marker: Marker,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: NO_PARENT,
            seq: 0,
            open: false,
            marker: Marker::Unvisited,
        }
    }
}

/// Open-set entry ordered by `(f, seq)` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
struct NodeRef {
    idx: usize,
    f: f64,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest f first, and among
        // equal f the earliest inserted.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// A single A* search that can be advanced one expansion at a time.
///
/// The engine owns all search state (scores, predecessors, open set) and
/// borrows the grid only for the duration of each call. Calling
/// [`initialize`](Self::initialize) again discards everything from the
/// previous search.
///
/// The open set has no decrease-key. When a cell that is still open gets a
/// better score, a fresh entry is pushed and the old one stays in the heap;
/// it is recognised as stale and skipped when popped. Tie-breaking between
/// equal `f` is by insertion sequence (FIFO).
#[derive(Default)]
pub struct SearchEngine {
    state: SearchState,
    topology: Topology,
    size: usize,
    start: usize,
    end: usize,
    goal: Point,
    nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    open_len: usize,
    counter: u64,
    revision: u64,
    path: Vec<Point>,
    expansions: usize,
}

impl SearchEngine {
    /// Create an engine in the `Uninitialized` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search from `start` to `end`.
    ///
    /// Any previous search state is discarded first. Fails with
    /// [`SearchError::InvalidEndpoints`] when an endpoint is outside the
    /// grid, is a barrier, or both are the same cell, and with
    /// [`SearchError::StaleAdjacency`] when the grid's adjacency was not
    /// refreshed for `topology`. On failure the engine stays
    /// `Uninitialized`.
    pub fn initialize(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        topology: Topology,
    ) -> Result<(), SearchError> {
        self.abandon();

        let start_idx = grid
            .idx(start)
            .ok_or_else(|| SearchError::InvalidEndpoints(format!("start {start} is out of bounds")))?;
        let end_idx = grid
            .idx(end)
            .ok_or_else(|| SearchError::InvalidEndpoints(format!("end {end} is out of bounds")))?;
        if start_idx == end_idx {
            return Err(SearchError::InvalidEndpoints(format!(
                "start and end are both {start}"
            )));
        }
        for p in [start, end] {
            if grid.is_barrier(p) {
                return Err(SearchError::InvalidEndpoints(format!("{p} is a barrier")));
            }
        }
        if !grid.adjacency_current(topology) {
            return Err(SearchError::StaleAdjacency(topology));
        }

        self.topology = topology;
        self.size = grid.size();
        self.start = start_idx;
        self.end = end_idx;
        self.goal = end;
        self.revision = grid.revision();
        self.nodes.resize(grid.len(), Node::default());

        let f = heuristic(start, end, topology);
        let node = &mut self.nodes[start_idx];
        node.g = 0.0;
        node.f = f;
        node.open = true;
        self.open.push(NodeRef {
            idx: start_idx,
            f,
            seq: 0,
        });
        self.open_len = 1;
        self.counter = 1;
        self.state = SearchState::Running;

        log::debug!("search {start} -> {end} ({topology}), h = {f:.3}");
        Ok(())
    }

    /// Start a search between the grid's marked start and end cells.
    pub fn initialize_marked(&mut self, grid: &Grid, topology: Topology) -> Result<(), SearchError> {
        match (grid.start(), grid.end()) {
            (Some(s), Some(e)) => self.initialize(grid, s, e, topology),
            (None, _) => {
                self.abandon();
                Err(SearchError::InvalidEndpoints("no start cell marked".into()))
            }
            (Some(_), None) => {
                self.abandon();
                Err(SearchError::InvalidEndpoints("no end cell marked".into()))
            }
        }
    }

    /// Discard all search state and return to `Uninitialized`.
    pub fn abandon(&mut self) {
        self.state = SearchState::Uninitialized;
        self.nodes.clear();
        self.open.clear();
        self.open_len = 0;
        self.counter = 0;
        self.path.clear();
        self.expansions = 0;
    }

    /// Perform exactly one expansion and return the resulting state.
    ///
    /// Stepping an engine that is not `Running` changes nothing and returns
    /// its current state. If the grid's barrier layout changed since
    /// [`initialize`](Self::initialize), the search is abandoned and
    /// [`SearchError::GridModified`] is returned.
    pub fn step(&mut self, grid: &Grid) -> Result<SearchState, SearchError> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }
        if grid.revision() != self.revision
            || grid.len() != self.nodes.len()
            || !grid.adjacency_current(self.topology)
        {
            log::warn!("grid changed under a running search, abandoning it");
            self.abandon();
            return Err(SearchError::GridModified);
        }

        let current = loop {
            let Some(entry) = self.open.pop() else {
                self.state = SearchState::Exhausted;
                log::debug!("search exhausted after {} expansions", self.expansions);
                return Ok(self.state);
            };
            let node = &self.nodes[entry.idx];
            // Skip entries superseded by a later, cheaper insertion.
            if node.open && node.seq == entry.seq {
                break entry.idx;
            }
        };
        self.nodes[current].open = false;
        self.open_len -= 1;

        if current == self.end {
            self.path = reconstruct(|p| self.predecessor(p), self.goal)?;
            for &p in &self.path {
                if let Some(i) = grid.idx(p) {
                    self.nodes[i].marker = Marker::Path;
                }
            }
            self.state = SearchState::Found;
            log::debug!(
                "path found: {} steps, cost {:.3}, {} expansions",
                self.path.len(),
                self.nodes[current].g,
                self.expansions
            );
            return Ok(self.state);
        }

        self.expansions += 1;
        let cp = grid.point(current);
        let current_g = self.nodes[current].g;
        log::trace!("expand {cp} g = {current_g:.3}");

        for &np in grid.neighbors(cp) {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            let tentative_g = current_g + edge_cost(cp, np);
            let n = &mut self.nodes[ni];
            if tentative_g >= n.g {
                continue;
            }
            n.g = tentative_g;
            n.f = tentative_g + heuristic(np, self.goal, self.topology);
            n.parent = current;
            n.seq = self.counter;
            if !n.open {
                n.open = true;
                self.open_len += 1;
            }
            n.marker = Marker::Frontier;
            self.open.push(NodeRef {
                idx: ni,
                f: n.f,
                seq: self.counter,
            });
            self.counter += 1;
        }

        if current != self.start {
            self.nodes[current].marker = Marker::Expanded;
        }
        Ok(self.state)
    }

    /// Step until the search is `Found` or `Exhausted`.
    ///
    /// Returns the state unchanged if the engine is not `Running`.
    pub fn run_to_completion(&mut self, grid: &Grid) -> Result<SearchState, SearchError> {
        while self.state == SearchState::Running {
            self.step(grid)?;
        }
        Ok(self.state)
    }

    /// Rebuild the path from the predecessor map.
    ///
    /// Fails with [`SearchError::NoPathRecorded`] unless the goal has been
    /// reached.
    pub fn reconstruct_path(&self) -> Result<Vec<Point>, SearchError> {
        if self.state != SearchState::Found {
            return Err(SearchError::NoPathRecorded(self.goal));
        }
        reconstruct(|p| self.predecessor(p), self.goal)
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The path (start excluded, end included) once `Found`.
    pub fn path(&self) -> Option<&[Point]> {
        (self.state == SearchState::Found).then_some(self.path.as_slice())
    }

    /// Cost of the path once `Found`.
    pub fn path_cost(&self) -> Option<f64> {
        (self.state == SearchState::Found).then(|| self.nodes[self.end].g)
    }

    /// Best known cost from start to `p`; `+∞` if not reached.
    pub fn g_score(&self, p: Point) -> f64 {
        self.node(p).map_or(f64::INFINITY, |n| n.g)
    }

    /// `g_score(p)` plus the heuristic; `+∞` if not reached.
    pub fn f_score(&self, p: Point) -> f64 {
        self.node(p).map_or(f64::INFINITY, |n| n.f)
    }

    /// Predecessor of `p` on the best known path from start.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        let parent = self.node(p)?.parent;
        (parent != NO_PARENT).then(|| self.point(parent))
    }

    pub fn marker(&self, p: Point) -> Marker {
        self.node(p).map_or(Marker::Unvisited, |n| n.marker)
    }

    /// Whether `p` is currently in the open set.
    pub fn is_open(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| n.open)
    }

    /// Number of cells in the open set.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.open_len
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn node(&self, p: Point) -> Option<&Node> {
        if p.row < 0 || p.col < 0 || p.row as usize >= self.size || p.col as usize >= self.size {
            return None;
        }
        self.nodes.get(p.row as usize * self.size + p.col as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx / self.size) as i32, (idx % self.size) as i32)
    }
}
