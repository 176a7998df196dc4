//! Front-end configuration, read from an optional JSON file.
//!
//! ```json
//! {
//!     "terrain": { "columns": 30, "rows": 18, "wall_chance": 0.15 },
//!     "tick": "40",
//!     "algorithm": "Dijkstra",
//!     "seed": 7
//! }
//! ```
//!
//! Every field is optional. `tick` accepts a number or a string and falls
//! back to 100 ms when it cannot be read.

use std::fmt;
use std::path::Path;

use pathviz_core::{TerrainConfig, TickInterval};
use pathviz_search::Algorithm;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub terrain: TerrainConfig,
    pub tick: TickInterval,
    pub algorithm: Algorithm,
    /// Seed for terrain generation; random when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Errors that can occur when loading a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config: {e}"),
            Self::Json(e) => write!(f, "config: invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let c = Config::from_json("{}").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.terrain.columns, 20);
        assert_eq!(c.tick, TickInterval::DEFAULT);
        assert_eq!(c.algorithm, Algorithm::AStar);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn full_document() {
        let c = Config::from_json(
            r#"{
                "terrain": { "columns": 30, "rows": 18, "wall_chance": 0.15 },
                "tick": "40",
                "algorithm": "Dijkstra",
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(c.terrain.columns, 30);
        assert_eq!(c.terrain.rows, 18);
        assert_eq!(c.tick.millis(), 40);
        assert_eq!(c.algorithm, Algorithm::Dijkstra);
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn partial_terrain_and_bad_tick() {
        let c = Config::from_json(r#"{ "terrain": { "rows": 5 }, "tick": "soon" }"#).unwrap();
        assert_eq!(c.terrain.rows, 5);
        assert_eq!(c.terrain.columns, 20);
        assert_eq!(c.tick, TickInterval::DEFAULT);
    }

    #[test]
    fn unknown_algorithm_is_an_error() {
        let err = Config::from_json(r#"{ "algorithm": "DFS" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("config: invalid JSON"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
