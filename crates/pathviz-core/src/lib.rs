//! Shared types for the pathviz search visualizer.
//!
//! This crate provides the pieces every other member builds on: geometry
//! primitives, the obstacle [`Grid`] a search runs over, random terrain
//! generation, and the tick-interval configuration a driver uses to pace
//! incremental searches.

pub mod geom;
pub mod grid;
pub mod terrain;
pub mod tick;

pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
pub use terrain::{TerrainConfig, random_terrain};
pub use tick::{TickInterval, Ticker};
