//! The search frontier: a FIFO queue for BFS or a stable min-priority queue
//! for A* and Dijkstra.
//!
//! The priority queue is keyed by `(priority, insertion_order)`, so equal
//! priorities pop in the order they were pushed. Together with the fixed
//! neighbour order of [`Grid::neighbors`](pathviz_core::Grid::neighbors)
//! this makes every search fully deterministic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::Point;

use crate::algorithm::Algorithm;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    priority: i32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
    pos: Point,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap stores `Reverse<Entry>` to pop the smallest.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Clone, Debug)]
enum Queue {
    Fifo(VecDeque<Point>),
    Heap(BinaryHeap<Reverse<Entry>>),
}

/// Discovered-but-not-yet-expanded cells.
///
/// The frontier may hold several entries for the same cell; the engine
/// skips stale ones when they are popped.
#[derive(Clone, Debug)]
pub struct Frontier {
    queue: Queue,
    seq: u64,
}

impl Frontier {
    /// A first-in, first-out frontier. Priorities passed to
    /// [`push`](Self::push) are ignored.
    pub fn fifo() -> Self {
        Self {
            queue: Queue::Fifo(VecDeque::new()),
            seq: 0,
        }
    }

    /// A min-priority frontier with FIFO tie-breaking.
    pub fn priority() -> Self {
        Self {
            queue: Queue::Heap(BinaryHeap::new()),
            seq: 0,
        }
    }

    /// The frontier kind `algorithm` needs.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        if algorithm.is_weighted() {
            Self::priority()
        } else {
            Self::fifo()
        }
    }

    /// Add `pos` with the given priority.
    pub fn push(&mut self, pos: Point, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        match &mut self.queue {
            Queue::Fifo(q) => q.push_back(pos),
            Queue::Heap(h) => h.push(Reverse(Entry { priority, seq, pos })),
        }
    }

    /// Remove and return the next cell (lowest priority, earliest pushed).
    pub fn pop(&mut self) -> Option<Point> {
        match &mut self.queue {
            Queue::Fifo(q) => q.pop_front(),
            Queue::Heap(h) => h.pop().map(|Reverse(e)| e.pos),
        }
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        match &self.queue {
            Queue::Fifo(q) => q.len(),
            Queue::Heap(h) => h.len(),
        }
    }

    /// Whether no entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry in the order it would be popped.
    pub fn ordered(&self) -> Vec<Point> {
        match &self.queue {
            Queue::Fifo(q) => q.iter().copied().collect(),
            Queue::Heap(h) => {
                let mut entries: Vec<&Entry> = h.iter().map(|Reverse(e)| e).collect();
                entries.sort();
                entries.into_iter().map(|e| e.pos).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn fifo_ignores_priority() {
        let mut f = Frontier::fifo();
        f.push(p(0, 0), 9);
        f.push(p(1, 0), 1);
        f.push(p(2, 0), 5);
        assert_eq!(f.ordered(), vec![p(0, 0), p(1, 0), p(2, 0)]);
        assert_eq!(f.pop(), Some(p(0, 0)));
        assert_eq!(f.pop(), Some(p(1, 0)));
        assert_eq!(f.pop(), Some(p(2, 0)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn priority_pops_lowest_first() {
        let mut f = Frontier::priority();
        f.push(p(0, 0), 3);
        f.push(p(1, 0), 1);
        f.push(p(2, 0), 2);
        assert_eq!(f.pop(), Some(p(1, 0)));
        assert_eq!(f.pop(), Some(p(2, 0)));
        assert_eq!(f.pop(), Some(p(0, 0)));
        assert!(f.is_empty());
    }

    #[test]
    fn priority_ties_are_fifo() {
        let mut f = Frontier::priority();
        // Pushed in an order that differs from coordinate order.
        f.push(p(5, 5), 4);
        f.push(p(0, 0), 4);
        f.push(p(3, 1), 4);
        f.push(p(9, 9), 2);
        assert_eq!(f.ordered(), vec![p(9, 9), p(5, 5), p(0, 0), p(3, 1)]);
        assert_eq!(f.pop(), Some(p(9, 9)));
        assert_eq!(f.pop(), Some(p(5, 5)));
        assert_eq!(f.pop(), Some(p(0, 0)));
        assert_eq!(f.pop(), Some(p(3, 1)));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = Frontier::priority();
        f.push(p(1, 1), 5);
        f.push(p(1, 1), 3);
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some(p(1, 1)));
        assert_eq!(f.pop(), Some(p(1, 1)));
    }

    #[test]
    fn for_algorithm_picks_kind() {
        let mut f = Frontier::for_algorithm(Algorithm::Bfs);
        f.push(p(0, 0), 10);
        f.push(p(1, 0), 0);
        assert_eq!(f.pop(), Some(p(0, 0)));

        let mut f = Frontier::for_algorithm(Algorithm::Dijkstra);
        f.push(p(0, 0), 10);
        f.push(p(1, 0), 0);
        assert_eq!(f.pop(), Some(p(1, 0)));
    }
}
