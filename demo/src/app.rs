//! The visualizer model: terrain, endpoints, the running search and the
//! controls that change them. Rendering and input decoding live in
//! [`crate::term`]; everything here is plain state and can be tested
//! without a terminal.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use pathviz_core::{Grid, Point, TerrainConfig, TickInterval, Ticker, random_terrain};
use pathviz_search::{Algorithm, Outcome, Runner, SearchEngine, SearchError, StepObserver};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A decoded input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Primary click on a grid cell.
    Click(Point),
    /// Secondary click on a grid cell.
    AltClick(Point),
}

/// Whether the event loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// What to draw in a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
    Start,
    Goal,
    Visited,
    Frontier,
    Path,
}

// ---------------------------------------------------------------------------
// Status line observer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Status {
    message: String,
    expanded: usize,
}

impl StepObserver for Status {
    fn on_expand(&mut self, _current: Point, _relaxed: &[Point]) {
        self.expanded += 1;
    }

    fn on_path(&mut self, path: &[Point]) {
        self.message = format!(
            "Path found: {} cells after {} expansions",
            path.len(),
            self.expanded
        );
    }

    fn on_exhausted(&mut self) {
        self.message = format!("No path found ({} cells explored)", self.expanded);
    }
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer {
    terrain_config: TerrainConfig,
    terrain: Grid,
    rng: StdRng,
    start: Option<Point>,
    end: Option<Point>,
    algorithm: Algorithm,
    interval: TickInterval,
    /// Text being typed into the speed entry, when editing.
    speed_entry: Option<String>,
    runner: Option<Runner>,
    status: Status,
}

impl Visualizer {
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let terrain = random_terrain(&config.terrain, &mut rng);
        log::info!(
            "terrain {}x{} with seed {seed}, {} open cells",
            terrain.columns(),
            terrain.rows(),
            terrain.open_count()
        );
        let mut vis = Self {
            terrain_config: config.terrain,
            terrain,
            rng,
            start: None,
            end: None,
            algorithm: config.algorithm,
            interval: config.tick,
            speed_entry: None,
            runner: None,
            status: Status::default(),
        };
        vis.status.message = "Click to place the start cell".to_string();
        vis
    }

    pub fn terrain(&self) -> &Grid {
        &self.terrain
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn interval(&self) -> TickInterval {
        self.interval
    }

    pub fn message(&self) -> &str {
        &self.status.message
    }

    /// The speed entry text, while it is being edited.
    pub fn speed_entry(&self) -> Option<&str> {
        self.speed_entry.as_deref()
    }

    /// Whether a search is animating.
    pub fn is_running(&self) -> bool {
        self.runner.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Handle one input event.
    pub fn update(&mut self, msg: Msg) -> Control {
        if self.speed_entry.is_some() {
            self.edit_speed(msg);
            return Control::Continue;
        }
        match msg {
            Msg::Char('q') | Msg::Escape => return Control::Quit,
            Msg::Click(p) => self.place(p),
            Msg::AltClick(p) => self.toggle_wall(p),
            Msg::Enter | Msg::Char(' ') => self.run(),
            Msg::Tab => {
                self.algorithm = self.algorithm.next();
                self.status.message = format!("Algorithm: {}", self.algorithm);
            }
            Msg::Char('r') => self.reset(),
            Msg::Char('t') => self.reset_terrain(),
            Msg::Char('+') | Msg::Char('=') => self.set_interval(self.interval.faster()),
            Msg::Char('-') => self.set_interval(self.interval.slower()),
            Msg::Char('s') => {
                self.speed_entry = Some(self.interval.millis().to_string());
                self.status.message = "Speed (ms): type a value, Enter to apply".to_string();
            }
            _ => {}
        }
        Control::Continue
    }

    fn edit_speed(&mut self, msg: Msg) {
        let Some(entry) = self.speed_entry.as_mut() else {
            return;
        };
        match msg {
            Msg::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => entry.push(c),
            Msg::Backspace => {
                entry.pop();
            }
            Msg::Enter => {
                let interval = TickInterval::parse(entry);
                self.speed_entry = None;
                self.set_interval(interval);
            }
            Msg::Escape => {
                self.speed_entry = None;
                self.status.message = format!("Speed unchanged: {}", self.interval);
            }
            _ => {}
        }
    }

    fn set_interval(&mut self, interval: TickInterval) {
        self.interval = interval;
        if let Some(runner) = self.runner.as_mut() {
            runner.set_interval(interval);
        }
        self.status.message = format!("Speed: {interval}");
    }

    /// Place the start cell, then the end cell. Further clicks are ignored
    /// until a reset.
    fn place(&mut self, p: Point) {
        if !self.terrain.contains(p) || self.runner.is_some() {
            return;
        }
        if self.start.is_none() {
            self.start = Some(p);
            self.status.message = format!("Start at {p}; click to place the end cell");
        } else if self.end.is_none() {
            self.end = Some(p);
            self.status.message = format!("End at {p}; press Enter to run {}", self.algorithm);
        }
    }

    fn toggle_wall(&mut self, p: Point) {
        if self.runner.is_some() || Some(p) == self.start || Some(p) == self.end {
            return;
        }
        self.terrain.toggle(p);
    }

    /// Start a search between the placed endpoints.
    fn run(&mut self) {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            self.status.message = "Place a start and an end cell first".to_string();
            return;
        };
        if self.is_running() {
            return;
        }
        match SearchEngine::new(self.terrain.clone(), start, end, self.algorithm) {
            Ok(engine) => {
                self.runner = Some(Runner::new(engine, Ticker::new(self.interval)));
                self.status = Status {
                    message: format!("Running {}...", self.algorithm),
                    expanded: 0,
                };
            }
            Err(e) => {
                log::warn!("cannot start search: {e}");
                self.status.message = format!("Cannot run: {e}");
            }
        }
    }

    /// Clear endpoints and any search, keeping the terrain.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.runner = None;
        self.status = Status {
            message: "Click to place the start cell".to_string(),
            expanded: 0,
        };
    }

    /// Generate fresh terrain, then [`reset`](Self::reset).
    pub fn reset_terrain(&mut self) {
        self.terrain = random_terrain(&self.terrain_config, &mut self.rng);
        self.reset();
    }

    /// Advance the search if a step is due. Returns whether anything
    /// changed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, SearchError> {
        let Some(runner) = self.runner.as_mut() else {
            return Ok(false);
        };
        Ok(runner.poll(now, &mut self.status)?.is_some())
    }

    /// How long the event loop may wait before the next step is due.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.runner
            .as_ref()
            .filter(|r| !r.is_finished())
            .map(|r| r.remaining(now))
    }

    /// The tile for every grid cell, row-major.
    pub fn scene(&self) -> Vec<Tile> {
        let bounds = self.terrain.bounds();
        let mut tiles: Vec<Tile> = self
            .terrain
            .iter()
            .map(|(_, blocked)| if blocked { Tile::Wall } else { Tile::Open })
            .collect();
        let mut paint = |p: Point, tile: Tile| {
            if let Some(i) = bounds.index_of(p) {
                tiles[i] = tile;
            }
        };

        if let Some(runner) = &self.runner {
            let engine = runner.engine();
            for p in engine.frontier() {
                paint(p, Tile::Frontier);
            }
            for &p in engine.visited() {
                paint(p, Tile::Visited);
            }
            if let Some(Outcome::PathFound(path)) = runner.outcome() {
                let path: HashSet<Point> = path.iter().copied().collect();
                for p in path {
                    paint(p, Tile::Path);
                }
            }
        }
        if let Some(p) = self.start {
            paint(p, Tile::Start);
        }
        if let Some(p) = self.end {
            paint(p, Tile::Goal);
        }
        tiles
    }
}
