//! Parent links and path reconstruction.

use pathviz_core::{Point, Range};

use crate::error::SearchError;

const NO_PARENT: usize = usize::MAX;

/// Predecessor links recorded during a search, stored flat over a range.
///
/// A cell has a parent iff it has been reached by at least one relaxation.
#[derive(Clone, Debug)]
pub struct ParentMap {
    rng: Range,
    parents: Vec<usize>,
}

impl ParentMap {
    /// An empty map over `rng`.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            parents: vec![NO_PARENT; rng.len()],
        }
    }

    /// The range the map covers.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// The predecessor of `p`, if any.
    pub fn get(&self, p: Point) -> Option<Point> {
        let i = self.rng.index_of(p)?;
        match self.parents[i] {
            NO_PARENT => None,
            pi => Some(self.rng.point_at(pi)),
        }
    }

    /// Record `parent` as the predecessor of `child`, replacing any previous
    /// link. Points outside the range are ignored.
    pub fn set(&mut self, child: Point, parent: Point) {
        if let (Some(ci), Some(pi)) = (self.rng.index_of(child), self.rng.index_of(parent)) {
            self.parents[ci] = pi;
        }
    }
}

/// Follow parent links back from `goal` to `start` and return the path in
/// travel order, both endpoints included.
///
/// Fails with [`SearchError::BrokenChain`] if the walk ends anywhere other
/// than `start`, or runs longer than the number of cells in the map (which
/// can only happen on a cycle).
pub fn reconstruct(
    parents: &ParentMap,
    start: Point,
    goal: Point,
) -> Result<Vec<Point>, SearchError> {
    if !parents.range().contains(goal) {
        return Err(SearchError::BrokenChain { at: goal });
    }
    let limit = parents.range().len();
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(prev) = parents.get(cur) {
        if path.len() >= limit {
            return Err(SearchError::BrokenChain { at: cur });
        }
        path.push(prev);
        cur = prev;
    }
    if cur != start {
        return Err(SearchError::BrokenChain { at: cur });
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn set_and_get() {
        let mut m = ParentMap::new(Range::with_size(3, 3));
        m.set(p(1, 0), p(0, 0));
        m.set(p(1, 0), p(1, 1));
        m.set(p(7, 7), p(0, 0));
        assert_eq!(m.get(p(1, 0)), Some(p(1, 1)));
        assert_eq!(m.get(p(0, 0)), None);
        assert_eq!(m.get(p(-1, 0)), None);
        assert_eq!(m.get(p(7, 7)), None);
    }

    #[test]
    fn reconstruct_straight_line() {
        let mut m = ParentMap::new(Range::with_size(4, 1));
        m.set(p(1, 0), p(0, 0));
        m.set(p(2, 0), p(1, 0));
        m.set(p(3, 0), p(2, 0));
        assert_eq!(
            reconstruct(&m, p(0, 0), p(3, 0)),
            Ok(vec![p(0, 0), p(1, 0), p(2, 0), p(3, 0)])
        );
    }

    #[test]
    fn reconstruct_start_is_goal() {
        let m = ParentMap::new(Range::with_size(2, 2));
        assert_eq!(reconstruct(&m, p(1, 1), p(1, 1)), Ok(vec![p(1, 1)]));
    }

    #[test]
    fn chain_ending_elsewhere_is_broken() {
        let mut m = ParentMap::new(Range::with_size(4, 1));
        m.set(p(3, 0), p(2, 0));
        assert_eq!(
            reconstruct(&m, p(0, 0), p(3, 0)),
            Err(SearchError::BrokenChain { at: p(2, 0) })
        );
    }

    #[test]
    fn cycle_is_broken() {
        let mut m = ParentMap::new(Range::with_size(2, 2));
        m.set(p(0, 0), p(1, 0));
        m.set(p(1, 0), p(1, 1));
        m.set(p(1, 1), p(0, 0));
        assert!(matches!(
            reconstruct(&m, p(0, 1), p(0, 0)),
            Err(SearchError::BrokenChain { .. })
        ));
    }

    #[test]
    fn goal_outside_range_is_broken() {
        let m = ParentMap::new(Range::with_size(2, 2));
        assert_eq!(
            reconstruct(&m, p(0, 0), p(5, 5)),
            Err(SearchError::BrokenChain { at: p(5, 5) })
        );
    }
}
