//! Path reconstruction from predecessor links.

use gridstar_core::Point;

use crate::error::SearchError;

/// Walk a predecessor map back from `end`.
///
/// `came_from` returns the predecessor of a cell, or `None` for the start
/// cell (which never has one). The result runs in start→end order, excludes
/// the start and includes `end`.
///
/// Fails with [`SearchError::NoPathRecorded`] when `end` itself has no
/// predecessor, i.e. no successful search reached it.
pub fn reconstruct<F>(came_from: F, end: Point) -> Result<Vec<Point>, SearchError>
where
    F: Fn(Point) -> Option<Point>,
{
    let mut prev = came_from(end).ok_or(SearchError::NoPathRecorded(end))?;
    let mut path = vec![end];
    while let Some(p) = came_from(prev) {
        path.push(prev);
        prev = p;
    }
    path.reverse();
    Ok(path)
}
