//! The incremental search state machine.

use std::fmt;

use pathviz_core::{Grid, Point};

use crate::algorithm::Algorithm;
use crate::distance::manhattan;
use crate::error::{Endpoint, EndpointIssue, SearchError};
use crate::frontier::Frontier;
use crate::path::{ParentMap, reconstruct};
use crate::step::{Outcome, StepResult};

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// Where a search stands between two steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// More steps may be taken.
    Ready,
    /// The goal was reached.
    Succeeded,
    /// The goal is unreachable.
    Exhausted,
}

impl SearchStatus {
    /// Whether no more steps may be taken.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Ready)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Exhausted => f.write_str("exhausted"),
        }
    }
}

/// A single search run from `start` to `goal`, advanced one expansion per
/// [`step`](Self::step).
///
/// The engine owns a snapshot of the grid, so obstacles cannot change under
/// a running search. Once a step reports a terminal outcome the engine is
/// spent; build a new one for the next run.
///
/// A* and Dijkstra keep a best-known cost per cell and may push a cell
/// several times as cheaper routes turn up; outdated entries are skipped
/// when popped. BFS marks cells visited when they are dequeued and records
/// each cell's predecessor on first discovery only, which for unit costs is
/// already the shortest route.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    grid: Grid,
    start: Point,
    goal: Point,
    algorithm: Algorithm,
    status: SearchStatus,
    outcome: Outcome,
    frontier: Frontier,
    visited: Vec<bool>,
    visit_order: Vec<Point>,
    cost: Vec<i32>,
    parents: ParentMap,
    expansions: usize,
    steps: usize,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl SearchEngine {
    /// Prepare a search over `grid`.
    ///
    /// Fails with [`SearchError::InvalidEndpoint`] if either endpoint is
    /// outside the grid or blocked. `start == goal` is fine: the first step
    /// then succeeds with a one-cell path.
    pub fn new(
        grid: Grid,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
    ) -> Result<Self, SearchError> {
        check_endpoint(&grid, Endpoint::Start, start)?;
        check_endpoint(&grid, Endpoint::Goal, goal)?;

        let rng = grid.bounds();
        let len = rng.len();
        let mut engine = Self {
            grid,
            start,
            goal,
            algorithm,
            status: SearchStatus::Ready,
            outcome: Outcome::Pending,
            frontier: Frontier::for_algorithm(algorithm),
            visited: vec![false; len],
            visit_order: Vec::new(),
            cost: vec![UNREACHABLE; len],
            parents: ParentMap::new(rng),
            expansions: 0,
            steps: 0,
            nbuf: Vec::with_capacity(4),
        };

        let si = engine.idx(start);
        engine.cost[si] = 0;
        let priority = engine.priority(start, 0);
        engine.frontier.push(start, priority);

        log::debug!(
            "{algorithm} search from {start} to {goal} on a {}x{} grid",
            rng.width(),
            rng.height()
        );
        Ok(engine)
    }

    /// Pop one cell from the frontier and relax its neighbours.
    ///
    /// Returns the terminal result once the goal is popped or the frontier
    /// is empty. Calling `step` after that fails with
    /// [`SearchError::InvalidState`].
    pub fn step(&mut self) -> Result<StepResult, SearchError> {
        if self.status.is_terminal() {
            return Err(SearchError::InvalidState {
                status: self.status,
            });
        }
        self.steps += 1;

        let (current, ci) = loop {
            let Some(p) = self.frontier.pop() else {
                self.status = SearchStatus::Exhausted;
                self.outcome = Outcome::Exhausted;
                log::debug!(
                    "{} search exhausted after {} expansions",
                    self.algorithm,
                    self.expansions
                );
                return Ok(StepResult::exhausted());
            };
            let i = self.idx(p);
            // Skip stale entries.
            if self.visited[i] {
                continue;
            }
            break (p, i);
        };

        if !self.algorithm.is_weighted() {
            self.mark_visited(current, ci);
        }

        if current == self.goal {
            let path = reconstruct(&self.parents, self.start, self.goal)?;
            self.status = SearchStatus::Succeeded;
            self.outcome = Outcome::PathFound(path.clone());
            log::debug!(
                "{} search reached {} in {} steps, path of {} cells",
                self.algorithm,
                self.goal,
                self.steps,
                path.len()
            );
            return Ok(StepResult::found(current, path));
        }

        let relaxed = self.relax(current, ci);

        if self.algorithm.is_weighted() {
            self.mark_visited(current, ci);
        }
        self.expansions += 1;

        log::trace!(
            "step {}: expanded {current}, relaxed {}, frontier {}",
            self.steps,
            relaxed.len(),
            self.frontier.len()
        );
        Ok(StepResult::expanded(current, relaxed))
    }

    fn relax(&mut self, current: Point, ci: usize) -> Vec<Point> {
        let tentative = self.cost[ci] + 1;
        let mut relaxed = Vec::new();

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_into(current, &mut nbuf);

        for &np in nbuf.iter() {
            let ni = self.idx(np);
            if self.algorithm.is_weighted() {
                if tentative >= self.cost[ni] {
                    continue;
                }
                self.cost[ni] = tentative;
                self.parents.set(np, current);
                let priority = self.priority(np, tentative);
                self.frontier.push(np, priority);
                relaxed.push(np);
            } else {
                if self.visited[ni] {
                    continue;
                }
                if self.cost[ni] == UNREACHABLE {
                    self.cost[ni] = tentative;
                    self.parents.set(np, current);
                    relaxed.push(np);
                }
                self.frontier.push(np, tentative);
            }
        }

        self.nbuf = nbuf;
        relaxed
    }

    fn mark_visited(&mut self, p: Point, i: usize) {
        self.visited[i] = true;
        self.visit_order.push(p);
    }

    fn priority(&self, p: Point, cost: i32) -> i32 {
        match self.algorithm {
            Algorithm::AStar => cost + manhattan(p, self.goal),
            Algorithm::Dijkstra | Algorithm::Bfs => cost,
        }
    }

    /// Flat index of an in-bounds point. Every point the engine stores has
    /// been validated against the grid already.
    #[inline]
    fn idx(&self, p: Point) -> usize {
        let rng = self.grid.bounds();
        (p.y * rng.width() + p.x) as usize
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The grid snapshot being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// How the search ended, or [`Outcome::Pending`] while it runs.
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the search has finished.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of cells expanded so far. The step that pops the goal is not
    /// an expansion.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of successful `step` calls so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Cells marked visited, in marking order.
    ///
    /// For A* and Dijkstra these are exactly the expanded cells. BFS marks a
    /// cell as soon as it is dequeued, so on success the goal is included.
    pub fn visited(&self) -> &[Point] {
        &self.visit_order
    }

    /// Whether `p` has been marked visited.
    pub fn is_visited(&self, p: Point) -> bool {
        self.grid
            .bounds()
            .index_of(p)
            .is_some_and(|i| self.visited[i])
    }

    /// Cells waiting in the frontier, in the order they will be expanded.
    ///
    /// Outdated entries (cells already visited, or repeated entries for the
    /// same cell) are left out.
    pub fn frontier(&self) -> Vec<Point> {
        if self.frontier.is_empty() {
            return Vec::new();
        }
        let mut seen = vec![false; self.visited.len()];
        self.frontier
            .ordered()
            .into_iter()
            .filter(|&p| {
                let i = self.idx(p);
                if self.visited[i] || seen[i] {
                    return false;
                }
                seen[i] = true;
                true
            })
            .collect()
    }

    /// Raw number of frontier entries, outdated ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn cost_so_far(&self, p: Point) -> Option<i32> {
        let i = self.grid.bounds().index_of(p)?;
        match self.cost[i] {
            UNREACHABLE => None,
            c => Some(c),
        }
    }

    /// The predecessor recorded for `p`.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        self.parents.get(p)
    }
}

fn check_endpoint(grid: &Grid, which: Endpoint, point: Point) -> Result<(), SearchError> {
    let reason = if !grid.contains(point) {
        EndpointIssue::OutOfBounds
    } else if grid.blocked(point) {
        EndpointIssue::Blocked
    } else {
        return Ok(());
    };
    Err(SearchError::InvalidEndpoint {
        which,
        point,
        reason,
    })
}
