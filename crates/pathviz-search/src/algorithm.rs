use std::fmt;
use std::str::FromStr;

/// Which search the engine runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Best-first on `cost + manhattan(cell, goal)`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "A*", alias = "astar"))]
    AStar,
    /// Best-first on `cost`.
    Dijkstra,
    /// First in, first out.
    #[cfg_attr(feature = "serde", serde(rename = "BFS", alias = "bfs"))]
    Bfs,
}

impl Algorithm {
    /// Every variant, in selector order.
    pub const ALL: [Algorithm; 3] = [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Bfs];

    /// The next variant in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::AStar => Self::Dijkstra,
            Self::Dijkstra => Self::Bfs,
            Self::Bfs => Self::AStar,
        }
    }

    /// Display name, as shown in a selector.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "A*",
            Self::Dijkstra => "Dijkstra",
            Self::Bfs => "BFS",
        }
    }

    /// Whether the frontier is a priority queue (as opposed to a FIFO).
    #[inline]
    pub const fn is_weighted(self) -> bool {
        !matches!(self, Self::Bfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("a*") || s.eq_ignore_ascii_case("astar") {
            Ok(Self::AStar)
        } else if s.eq_ignore_ascii_case("dijkstra") {
            Ok(Self::Dijkstra)
        } else if s.eq_ignore_ascii_case("bfs") {
            Ok(Self::Bfs)
        } else {
            Err(ParseAlgorithmError(s.to_string()))
        }
    }
}

/// An algorithm selector that names none of the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected A*, Dijkstra or BFS)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}
