//! Incremental shortest-path search on obstacle grids.
//!
//! This crate runs the classic grid searches one expansion at a time so a
//! host can animate them:
//!
//! - **A\*** with the Manhattan heuristic ([`Algorithm::AStar`])
//! - **Dijkstra** uniform-cost search ([`Algorithm::Dijkstra`])
//! - **BFS** breadth-first search ([`Algorithm::Bfs`])
//!
//! All three run through a single [`SearchEngine`]. Each call to
//! [`SearchEngine::step`] pops one cell from the frontier, relaxes its
//! neighbours and returns a [`StepResult`] describing what changed, until
//! the goal is reached ([`Outcome::PathFound`]) or the frontier runs dry
//! ([`Outcome::Exhausted`]). The engine never sleeps and never calls out
//! mid-step; pacing belongs to the caller, for instance a [`Runner`].
//!
//! # Example
//!
//! ```
//! use pathviz_core::{Grid, Point};
//! use pathviz_search::{Algorithm, Outcome, SearchEngine};
//!
//! let grid = Grid::parse("...\n.#.\n...").unwrap();
//! let mut engine =
//!     SearchEngine::new(grid, Point::new(0, 0), Point::new(2, 2), Algorithm::AStar).unwrap();
//! let path = loop {
//!     let step = engine.step().unwrap();
//!     match step.outcome {
//!         Outcome::Pending => continue,
//!         Outcome::PathFound(path) => break path,
//!         Outcome::Exhausted => panic!("no path"),
//!     }
//! };
//! assert_eq!(path.len(), 5);
//! ```

mod algorithm;
mod distance;
mod engine;
mod error;
mod frontier;
mod observer;
mod path;
mod runner;
mod step;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use distance::manhattan;
pub use engine::{SearchEngine, SearchStatus, UNREACHABLE};
pub use error::{Endpoint, EndpointIssue, SearchError};
pub use frontier::Frontier;
pub use observer::{StepObserver, StepRecorder};
pub use path::{ParentMap, reconstruct};
pub use runner::Runner;
pub use step::{Outcome, StepResult};
