//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and formatting,
//! making them usable in any context (engine, rendering, input mapping).
//!
//! # Round Shape
//!
//! - **Subset size**: 8 vocabulary entries per round
//! - **Tiles per round**: 2 per entry (one [`Side::Source`], one [`Side::Target`])
//! - **Grid**: 4 columns, 2 on narrow terminals
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MISMATCH_CLEAR_MS` | 1000 | How long a wrong pair stays highlighted |
//!
//! # Examples
//!
//! ```
//! use verbos_types::{Command, Phase, Side, DEFAULT_SUBSET_SIZE};
//!
//! assert_eq!(Side::Source.other(), Side::Target);
//! assert_eq!(Phase::Playing.as_str(), "playing");
//! assert_eq!(Command::NewRound.as_str(), "newRound");
//! assert_eq!(DEFAULT_SUBSET_SIZE, 8);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of vocabulary entries drawn per round.
pub const DEFAULT_SUBSET_SIZE: usize = 8;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay before a mismatched pair is deselected.
pub const MISMATCH_CLEAR_MS: u32 = 1000;

/// Tile grid columns on regular terminals.
pub const GRID_COLUMNS: u16 = 4;

/// Tile grid columns when the terminal is too narrow for four.
pub const GRID_COLUMNS_NARROW: u16 = 2;

/// Above this many mistakes the counter is drawn as a warning.
pub const MISTAKE_WARN_THRESHOLD: u32 = 5;

/// Feedback shown after a correct pair.
pub const MATCH_MESSAGE: &str = "¡Excelente!";

/// Placeholder used in mismatch feedback when no source-side tile was picked.
pub const UNKNOWN_VERB: &str = "That verb";


/// One vocabulary pair: a term in the learner's target language and its gloss.
///
/// The `source` text doubles as the pair key, so it must be unique within a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub source: String,
    pub target: String,
}

impl VocabularyEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Which half of a pair a tile shows.
///
/// - **Source**: the Spanish verb (also the pair key)
/// - **Target**: the English gloss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    /// The opposite half of the pair.
    pub fn other(&self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

/// Identity of a tile, unique across rounds.
///
/// `round` is the generation of the round the tile was dealt in, `slot` its
/// position in the unshuffled deal (`2 * entry + side`). Ids from an earlier
/// round never resolve against a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    round: u64,
    slot: u32,
}

impl TileId {
    pub const fn new(round: u64, slot: u32) -> Self {
        Self { round, slot }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}-{}", self.round, self.slot)
    }
}

/// A clickable unit dealt for one round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub text: String,
    pub side: Side,
    pub pair_key: String,
}

/// Session state-machine phase.
///
/// Transitions: `Menu → Playing` (start a round), `Playing → Finished` (all
/// pairs matched), any phase `→ Menu` (back to start), and `Finished → Playing`
/// (next set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        }
    }
}

/// Result kind of a two-tile resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Match,
    Mismatch,
}

/// Transient feedback for the last resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn matched() -> Self {
        Self {
            kind: OutcomeKind::Match,
            message: MATCH_MESSAGE.to_string(),
        }
    }

    /// Mismatch feedback naming the source-side verb that was picked, if any.
    pub fn mismatch(source_text: Option<&str>) -> Self {
        let verb = source_text.unwrap_or(UNKNOWN_VERB);
        Self {
            kind: OutcomeKind::Mismatch,
            message: format!("Not quite. {verb} matches with its specific meaning."),
        }
    }

    pub fn is_match(&self) -> bool {
        self.kind == OutcomeKind::Match
    }
}

/// Player commands, independent of the input device.
///
/// How a command is interpreted depends on the current [`Phase`]; for example
/// `Confirm` starts a round from the menu but selects a tile while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the grid cursor one row up
    MoveUp,
    /// Move the grid cursor one row down
    MoveDown,
    /// Move the grid cursor one cell left
    MoveLeft,
    /// Move the grid cursor one cell right
    MoveRight,
    /// Start a round, or select the tile under the cursor
    Confirm,
    /// Deal a fresh round from any phase
    NewRound,
    /// Return to the start screen
    BackToMenu,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveUp => "moveUp",
            Command::MoveDown => "moveDown",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Confirm => "confirm",
            Command::NewRound => "newRound",
            Command::BackToMenu => "backToMenu",
        }
    }
}
