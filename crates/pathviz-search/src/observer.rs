//! The per-step notification contract between a search and its renderer.

use pathviz_core::Point;

/// Receives the effect of each search step.
///
/// Every hook has a no-op default, so renderers implement only what they
/// draw. Hooks are driven by [`StepResult::notify`](crate::StepResult::notify)
/// after a step returns; the engine itself never calls out.
pub trait StepObserver {
    /// `current` was expanded and `relaxed` were (re)discovered from it.
    fn on_expand(&mut self, _current: Point, _relaxed: &[Point]) {}

    /// The goal was reached along `path` (start to goal inclusive).
    fn on_path(&mut self, _path: &[Point]) {}

    /// The frontier ran dry without reaching the goal.
    fn on_exhausted(&mut self) {}
}

/// Observer that ignores everything.
impl StepObserver for () {}

/// Observer that keeps a log of everything it was told.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepRecorder {
    /// Expanded cells, in order.
    pub expanded: Vec<Point>,
    /// Every relaxed cell, in order, duplicates included.
    pub relaxed: Vec<Point>,
    /// The final path, once found.
    pub path: Option<Vec<Point>>,
    /// Whether exhaustion was reported.
    pub exhausted: bool,
}

impl StepObserver for StepRecorder {
    fn on_expand(&mut self, current: Point, relaxed: &[Point]) {
        self.expanded.push(current);
        self.relaxed.extend_from_slice(relaxed);
    }

    fn on_path(&mut self, path: &[Point]) {
        self.path = Some(path.to_vec());
    }

    fn on_exhausted(&mut self) {
        self.exhausted = true;
    }
}
