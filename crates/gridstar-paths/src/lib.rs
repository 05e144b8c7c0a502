//! Step-wise A* search on a square grid.
//!
//! The crate is split along the stages of a search:
//!
//! - **Neighbour resolution** ([`refresh`], [`refresh_all`]) fills each
//!   cell's adjacency list for a [`Topology`], applying the diagonal
//!   corner rule.
//! - **Cost model** ([`edge_cost`], [`heuristic`]) prices moves and
//!   estimates the remaining distance (Manhattan for 4-directional
//!   movement, Euclidean for 8-directional).
//! - **Search** ([`SearchEngine`]) advances the frontier one expansion at a
//!   time with [`step`](SearchEngine::step), or all at once with
//!   [`run_to_completion`](SearchEngine::run_to_completion).
//! - **Reconstruction** ([`reconstruct`]) walks the predecessor map back
//!   from the goal.
//!
//! ```
//! use gridstar_core::{Grid, Point, Topology};
//! use gridstar_paths::{refresh_all, SearchEngine, SearchState};
//!
//! let mut grid = Grid::new(5);
//! refresh_all(&mut grid, Topology::FourDirectional);
//!
//! let mut engine = SearchEngine::new();
//! engine
//!     .initialize(&grid, Point::new(0, 0), Point::new(4, 4), Topology::FourDirectional)
//!     .unwrap();
//! assert_eq!(engine.run_to_completion(&grid).unwrap(), SearchState::Found);
//! assert_eq!(engine.path_cost(), Some(8.0));
//! ```

mod distance;
mod engine;
mod error;
mod neighbors;
mod path;

pub use distance::{edge_cost, euclidean, heuristic, manhattan, path_cost, DIAGONAL_COST};
pub use engine::{Marker, SearchEngine, SearchState};
pub use error::SearchError;
pub use neighbors::{refresh, refresh_all, resolve};
pub use path::reconstruct;

pub use gridstar_core::Topology;
