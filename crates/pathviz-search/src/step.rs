use pathviz_core::Point;

use crate::observer::StepObserver;

/// How a step left the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// More steps are needed.
    Pending,
    /// The goal was reached; the path runs from start to goal inclusive.
    PathFound(Vec<Point>),
    /// The frontier ran empty: the goal is unreachable.
    Exhausted,
}

impl Outcome {
    /// Whether the search is over.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::PathFound(path) => Some(path),
            _ => None,
        }
    }
}

/// What a single [`SearchEngine::step`](crate::SearchEngine::step) did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    /// The cell popped from the frontier this step: the expanded cell on a
    /// pending step, the goal on success, `None` on exhaustion.
    pub current: Option<Point>,
    /// Cells whose cost or predecessor was recorded this step, in neighbour
    /// order.
    pub relaxed: Vec<Point>,
    pub outcome: Outcome,
}

impl StepResult {
    pub(crate) fn expanded(current: Point, relaxed: Vec<Point>) -> Self {
        Self {
            current: Some(current),
            relaxed,
            outcome: Outcome::Pending,
        }
    }

    pub(crate) fn found(goal: Point, path: Vec<Point>) -> Self {
        Self {
            current: Some(goal),
            relaxed: Vec::new(),
            outcome: Outcome::PathFound(path),
        }
    }

    pub(crate) fn exhausted() -> Self {
        Self {
            current: None,
            relaxed: Vec::new(),
            outcome: Outcome::Exhausted,
        }
    }

    /// Whether this was the last step of the search.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// The path, if this step found one.
    pub fn path(&self) -> Option<&[Point]> {
        self.outcome.path()
    }

    /// Report this step to `observer`.
    pub fn notify<O: StepObserver + ?Sized>(&self, observer: &mut O) {
        match &self.outcome {
            Outcome::Pending => {
                if let Some(current) = self.current {
                    observer.on_expand(current, &self.relaxed);
                }
            }
            Outcome::PathFound(path) => observer.on_path(path),
            Outcome::Exhausted => observer.on_exhausted(),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_result_round_trip() {
        let step = StepResult::found(
            Point::new(1, 0),
            vec![Point::new(0, 0), Point::new(1, 0)],
        );
        let json = serde_json::to_string(&step).unwrap();
        let back: StepResult = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }
}
