use std::fmt;

use pathviz_core::Point;

use crate::engine::SearchStatus;

/// Which end of the search an [`SearchError::InvalidEndpoint`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds,
    Blocked,
}

/// Errors raised by [`SearchEngine`](crate::SearchEngine) and
/// [`reconstruct`](crate::reconstruct).
///
/// A search that finds no path is not an error: it ends with
/// [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is outside the grid or on a blocked cell.
    InvalidEndpoint {
        which: Endpoint,
        point: Point,
        reason: EndpointIssue,
    },
    /// `step` was called after the search had already finished.
    InvalidState { status: SearchStatus },
    /// The parent chain from the goal does not lead back to the start.
    BrokenChain { at: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { which, point, reason } => match reason {
                EndpointIssue::OutOfBounds => {
                    write!(f, "{which} {point} is outside the grid")
                }
                EndpointIssue::Blocked => write!(f, "{which} {point} is blocked"),
            },
            Self::InvalidState { status } => {
                write!(f, "search already finished ({status}); start a new one")
            }
            Self::BrokenChain { at } => {
                write!(f, "parent chain broken at {at}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
