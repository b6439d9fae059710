//! Configuration for the matcher and the CLI query surface.
//!
//! Defaults match the tuning the matcher was designed around (threshold 0.3,
//! distance factor 10, 32-bit match word). An optional TOML file supplies
//! overrides; explicit CLI flags win over the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Width of the match word. Patterns longer than this cannot be encoded into
/// the bit-parallel scan and are rejected.
pub const MAX_PATTERN_BITS: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "match", default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

/// Tuning for the approximate matcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Score above which a candidate location is rejected
    /// (0.0 = perfection required, 1.0 = very loose).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// How far from the expected location to search. A match this many chars
    /// away adds 1.0 to its score. 0 means exact-location only.
    #[serde(default = "default_distance")]
    pub distance: u32,
    /// Maximum pattern length in chars (one bit each in the match word).
    #[serde(default = "default_max_bits")]
    pub max_pattern_bits: usize,
}

fn default_threshold() -> f64 {
    0.3
}

fn default_distance() -> u32 {
    10
}

fn default_max_bits() -> usize {
    MAX_PATTERN_BITS
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            distance: default_distance(),
            max_pattern_bits: default_max_bits(),
        }
    }
}

/// Presentation-side defaults for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Truncate output to the top N results (None = everything the engine
    /// returned, itself capped at 100 per list).
    #[serde(default)]
    pub limit: Option<usize>,
    /// Emit `<strong>` markup around matched letters in human output.
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_highlight() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            limit: None,
            highlight: default_highlight(),
        }
    }
}

impl Config {
    /// Load config from an explicit TOML file, or defaults when `path` is
    /// `None`. A missing explicit file is an error; a malformed one too.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("read config {}: {err}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|err| Error::Config(format!("parse config {}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the matcher cannot honor.
    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        if !(0.0..=1.0).contains(&m.threshold) {
            return Err(Error::Config(format!(
                "match.threshold must be in [0.0, 1.0], got {}",
                m.threshold
            )));
        }
        if m.max_pattern_bits == 0 || m.max_pattern_bits > MAX_PATTERN_BITS {
            return Err(Error::Config(format!(
                "match.max_pattern_bits must be in [1, {MAX_PATTERN_BITS}], got {}",
                m.max_pattern_bits
            )));
        }
        Ok(())
    }
}
