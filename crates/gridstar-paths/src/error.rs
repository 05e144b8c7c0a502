//! Errors reported by the search engine.

use std::fmt;

use gridstar_core::{Point, Topology};

/// Errors reported by the search engine.
///
/// Running out of frontier is *not* an error: it is the terminal
/// [`SearchState::Exhausted`](crate::SearchState::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end missing, out of bounds, blocked, or identical.
    InvalidEndpoints(String),
    /// Adjacency was not refreshed for this topology since the last
    /// barrier edit.
    StaleAdjacency(Topology),
    /// The barrier layout or the grid's adjacency topology changed while the
    /// search was running. The search has been abandoned.
    GridModified,
    /// Path reconstruction found no predecessor for the goal.
    NoPathRecorded(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints(why) => write!(f, "search: invalid endpoints: {why}"),
            Self::StaleAdjacency(t) => {
                write!(f, "search: adjacency is not current for {t} movement")
            }
            Self::GridModified => f.write_str("search: grid modified during search"),
            Self::NoPathRecorded(p) => write!(f, "search: no path recorded to {p}"),
        }
    }
}

impl std::error::Error for SearchError {}
