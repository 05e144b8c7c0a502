//! Movement model: [`Topology`].

use std::fmt;

/// Which moves are allowed between cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Orthogonal moves only, unit cost. Paired with the Manhattan heuristic.
    FourDirectional,
    /// Orthogonal plus diagonal moves (diagonals cost √2). Paired with the
    /// Euclidean heuristic.
    #[default]
    EightDirectional,
}

impl Topology {
    /// Whether diagonal moves are allowed.
    #[inline]
    pub const fn allows_diagonals(self) -> bool {
        matches!(self, Self::EightDirectional)
    }

    /// The other topology.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::FourDirectional => Self::EightDirectional,
            Self::EightDirectional => Self::FourDirectional,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourDirectional => f.write_str("4-directional"),
            Self::EightDirectional => f.write_str("8-directional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let t = Topology::FourDirectional;
        assert!(!t.allows_diagonals());
        assert!(t.toggled().allows_diagonals());
        assert_eq!(t.toggled().toggled(), t);
    }
}
