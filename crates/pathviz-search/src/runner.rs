//! A headless driver that paces a [`SearchEngine`] with a [`Ticker`].

use std::time::Instant;

use pathviz_core::{TickInterval, Ticker};

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::observer::StepObserver;
use crate::step::{Outcome, StepResult};

/// Drives a search: one step per tick, stopping on the terminal result.
///
/// The runner never calls `step` on a finished engine, so a host can keep
/// polling it from its event loop without tracking the search state itself.
#[derive(Debug)]
pub struct Runner {
    engine: SearchEngine,
    ticker: Ticker,
    last: Option<StepResult>,
}

impl Runner {
    /// Wrap `engine`, stepping it whenever `ticker` is due.
    ///
    /// The engine may already have been stepped, or even finished.
    pub fn new(engine: SearchEngine, ticker: Ticker) -> Self {
        Self {
            engine,
            ticker,
            last: None,
        }
    }

    /// The search being driven.
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// The current pace.
    pub fn interval(&self) -> TickInterval {
        self.ticker.interval()
    }

    /// Change the pace of the remaining steps.
    pub fn set_interval(&mut self, interval: TickInterval) {
        self.ticker.set_interval(interval);
    }

    /// Time until the next step is due.
    pub fn remaining(&self, now: Instant) -> std::time::Duration {
        self.ticker.remaining(now)
    }

    /// Whether the search has finished.
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    /// The most recent step taken by this runner, if any.
    pub fn last_step(&self) -> Option<&StepResult> {
        self.last.as_ref()
    }

    /// The terminal outcome, once the search has finished.
    pub fn outcome(&self) -> Option<&Outcome> {
        Some(self.engine.outcome()).filter(|o| o.is_terminal())
    }

    /// Take one step if it is due at `now` and the search is still running.
    ///
    /// Returns the step taken, reported to `observer` first, or `None` if
    /// nothing happened.
    pub fn poll<O: StepObserver + ?Sized>(
        &mut self,
        now: Instant,
        observer: &mut O,
    ) -> Result<Option<&StepResult>, SearchError> {
        if self.engine.is_finished() || !self.ticker.due(now) {
            return Ok(None);
        }
        self.advance(observer)?;
        Ok(self.last.as_ref())
    }

    /// Step until the search finishes, ignoring the pace.
    pub fn run_to_end<O: StepObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        while !self.engine.is_finished() {
            self.advance(observer)?;
        }
        Ok(self.engine.outcome().clone())
    }

    fn advance<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<(), SearchError> {
        let step = self.engine.step()?;
        step.notify(observer);
        self.last = Some(step);
        Ok(())
    }

    /// Give back the engine, for inspection after the run.
    pub fn into_engine(self) -> SearchEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pathviz_core::{Grid, Point};

    use super::*;
    use crate::algorithm::Algorithm;
    use crate::observer::StepRecorder;

    fn runner(map: &str, start: Point, goal: Point, alg: Algorithm) -> Runner {
        let grid = Grid::parse(map).unwrap();
        let engine = SearchEngine::new(grid, start, goal, alg).unwrap();
        Runner::new(engine, Ticker::new(TickInterval::from_millis(50)))
    }

    #[test]
    fn run_to_end_reports_every_step() {
        let (start, goal) = (Point::new(0, 0), Point::new(2, 2));
        let mut r = runner("...\n.#.\n...", start, goal, Algorithm::Dijkstra);
        let mut rec = StepRecorder::default();
        let outcome = r.run_to_end(&mut rec).unwrap();
        let path = outcome.path().unwrap().to_vec();
        assert_eq!(path.len(), 5);
        assert_eq!(rec.path, Some(path));
        assert!(!rec.exhausted);
        assert_eq!(rec.expanded, r.engine().visited());
        assert_eq!(rec.expanded.len(), r.engine().expansions());
        assert!(r.is_finished());
        // Further runs are no-ops rather than errors.
        assert_eq!(r.run_to_end(&mut ()).unwrap(), outcome);
    }

    #[test]
    fn run_to_end_reports_exhaustion() {
        let mut r = runner(".#.", Point::new(0, 0), Point::new(2, 0), Algorithm::Bfs);
        let mut rec = StepRecorder::default();
        assert_eq!(r.run_to_end(&mut rec).unwrap(), Outcome::Exhausted);
        assert!(rec.exhausted);
        assert_eq!(rec.path, None);
        assert_eq!(rec.expanded, vec![Point::new(0, 0)]);
    }

    #[test]
    fn wraps_an_already_finished_engine() {
        let grid = Grid::parse("...").unwrap();
        let goal = Point::new(2, 0);
        let mut e = SearchEngine::new(grid, Point::new(0, 0), goal, Algorithm::Bfs).unwrap();
        while !e.step().unwrap().is_terminal() {}

        let mut r = Runner::new(e, Ticker::new(TickInterval::DEFAULT));
        assert!(r.is_finished());
        assert!(r.last_step().is_none());
        let want = Outcome::PathFound(vec![Point::new(0, 0), Point::new(1, 0), goal]);
        assert_eq!(r.outcome(), Some(&want));
        assert!(r.poll(Instant::now(), &mut ()).unwrap().is_none());

        let mut rec = StepRecorder::default();
        assert_eq!(r.run_to_end(&mut rec).unwrap(), want);
        assert!(rec.expanded.is_empty());
    }

    #[test]
    fn outcome_is_none_while_running() {
        let mut r = runner("....", Point::new(0, 0), Point::new(3, 0), Algorithm::AStar);
        assert_eq!(r.outcome(), None);
        r.poll(Instant::now(), &mut ()).unwrap();
        assert_eq!(r.outcome(), None);
    }

    #[test]
    fn poll_follows_the_ticker() {
        let mut r = runner(".....", Point::new(0, 0), Point::new(4, 0), Algorithm::AStar);
        let t0 = Instant::now();
        let tick = Duration::from_millis(50);

        let first = r.poll(t0, &mut ()).unwrap().cloned();
        assert_eq!(first.and_then(|s| s.current), Some(Point::new(0, 0)));
        assert!(r.poll(t0 + Duration::from_millis(10), &mut ()).unwrap().is_none());

        let mut now = t0;
        let mut polls = 1;
        while !r.is_finished() {
            now += tick;
            assert!(r.poll(now, &mut ()).unwrap().is_some());
            polls += 1;
        }
        // Four expansions plus the goal pop.
        assert_eq!(polls, 5);
        assert!(r.poll(now + tick, &mut ()).unwrap().is_none());
        assert_eq!(
            r.outcome().and_then(|o| o.path()).map(|p| p.len()),
            Some(5)
        );
    }

    #[test]
    fn interval_can_change_mid_run() {
        let mut r = runner("....", Point::new(0, 0), Point::new(3, 0), Algorithm::Bfs);
        r.set_interval(TickInterval::from_millis(500));
        assert_eq!(r.interval().millis(), 500);
        let t0 = Instant::now();
        assert!(r.poll(t0, &mut ()).unwrap().is_some());
        assert!(r.poll(t0 + Duration::from_millis(100), &mut ()).unwrap().is_none());
        assert!(r.poll(t0 + Duration::from_millis(500), &mut ()).unwrap().is_some());
        let engine = r.into_engine();
        assert_eq!(engine.expansions(), 2);
    }
}
