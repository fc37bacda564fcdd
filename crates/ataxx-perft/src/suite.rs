//! Perft suite files.
//!
//! A suite is a TOML file listing positions with their expected node counts:
//!
//! ```toml
//! [[position]]
//! name = "startpos"
//! fen = "startpos"
//! depth = 4
//! nodes = 155888
//! ```

use ataxx_engine::{perft, Position};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur when loading a suite file.
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Failed to read the suite file from disk.
    #[error("Failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the suite file as valid TOML.
    #[error("Failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The suite lists no positions.
    #[error("Suite contains no positions")]
    Empty,
}

/// One position with its expected perft count.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    /// Label printed in reports.
    pub name: String,
    /// Board notation. Defaults to the starting position.
    #[serde(default = "default_fen")]
    pub fen: String,
    /// Search depth in plies.
    pub depth: u32,
    /// Expected leaf count at `depth`.
    pub nodes: u64,
}

fn default_fen() -> String {
    "startpos".to_string()
}

/// A list of perft reference positions.
#[derive(Debug, Deserialize, Default)]
pub struct Suite {
    #[serde(default, rename = "position")]
    pub positions: Vec<SuiteEntry>,
}

impl Suite {
    /// Loads a suite from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::ReadError`] if the file cannot be read,
    /// [`SuiteError::ParseError`] if it is not a valid suite, or
    /// [`SuiteError::Empty`] if it lists no positions.
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a suite from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SuiteError> {
        let suite: Suite = toml::from_str(content)?;
        if suite.positions.is_empty() {
            return Err(SuiteError::Empty);
        }
        Ok(suite)
    }
}

/// The measured count for one suite entry.
#[derive(Debug)]
pub struct Outcome {
    pub depth: u32,
    pub expected: u64,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.nodes == self.expected
    }
}

impl SuiteEntry {
    /// Runs perft for this entry, never deeper than `max_depth`.
    ///
    /// When the depth is capped the expected count no longer applies, so the
    /// outcome is `None`.
    pub fn run(&self, max_depth: Option<u32>) -> Option<Outcome> {
        if max_depth.is_some_and(|max| self.depth > max) {
            return None;
        }

        let position = Position::from_fen(&self.fen);
        let start = Instant::now();
        let nodes = perft(&position, self.depth);

        Some(Outcome {
            depth: self.depth,
            expected: self.nodes,
            nodes,
            elapsed: start.elapsed(),
        })
    }
}
