//! **gridstar-core** — the grid model shared by the *gridstar* crates.
//!
//! This crate provides the coordinate type ([`Point`]), cell roles
//! ([`Role`]), the movement model ([`Topology`]) and the square [`Grid`]
//! arena that owns every [`Cell`] together with its adjacency list.
//!
//! Adjacency is *derived* data: it is filled in by
//! `gridstar_paths::refresh_all` and goes stale whenever a barrier is placed
//! or removed. [`Grid::adjacency_current`] reports whether it is safe to
//! start a search.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod topology;

pub use cell::{Cell, Role};
pub use geom::Point;
pub use grid::{Grid, GridError};
pub use topology::Topology;
