//! Render-facing copy of session state.

use crate::types::{Outcome, Phase, Side, TileId};

/// One tile with its derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub id: TileId,
    pub text: String,
    pub side: Side,
    pub pair_key: String,
    /// The tile's pair has been solved.
    pub matched: bool,
    /// The tile is part of the current selection.
    pub pending: bool,
}

/// Everything a presentation layer needs to draw one frame.
///
/// Implements `Hash` so a renderer can fingerprint frames and skip redraws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub round: u64,
    pub tiles: Vec<TileSnapshot>,
    pub mistakes: u32,
    pub matched_count: usize,
    pub total_pairs: usize,
    pub progress_percent: u32,
    pub last_outcome: Option<Outcome>,
    /// A mismatched pair is on screen, waiting to be deselected.
    pub clear_scheduled: bool,
}
