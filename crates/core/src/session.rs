//! Session module - the matching game state machine
//!
//! A [`Session`] owns one play-through at a time: it deals a shuffled round of
//! tiles, tracks the player's partial selection, resolves pairs into matches or
//! mistakes, and declares the round finished once every pair is solved.
//!
//! The only delayed effect is the deselection of a mismatched pair. It is a
//! scheduled clear identified by a [`ClearTicket`] (round generation plus
//! mismatch sequence number), driven either by [`Session::tick`] from a fixed
//! timestep loop or by an external scheduler through [`Session::expire_clear`].
//! Starting a new round drops any scheduled clear, so a stale timer can never
//! touch the new round.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::corpus::Corpus;
use crate::error::CoreError;
use crate::rng::SimpleRng;
use crate::snapshot::{SessionSnapshot, TileSnapshot};
use crate::types::{
    Outcome, Phase, Side, Tile, TileId, DEFAULT_SUBSET_SIZE, MISMATCH_CLEAR_MS,
};

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Vocabulary entries drawn per round (each yields two tiles).
    pub subset_size: usize,
    /// Delay before a mismatched pair is deselected.
    pub mismatch_clear_ms: u32,
    /// RNG seed; the same seed deals the same sequence of rounds.
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            subset_size: DEFAULT_SUBSET_SIZE,
            mismatch_clear_ms: MISMATCH_CLEAR_MS,
            seed: 1,
        }
    }
}

/// Identifies one scheduled deselection of a mismatched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearTicket {
    /// Round generation the mismatch happened in.
    pub round: u64,
    /// Session-wide mismatch sequence number.
    pub mismatch: u32,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledClear {
    ticket: ClearTicket,
    remaining_ms: u32,
}

/// What a call to [`Session::select_tile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed (wrong phase, unknown/stale id, solved or already picked tile).
    Ignored,
    /// First tile of a pair picked.
    Pending,
    /// The two picked tiles formed a pair.
    Matched { pair_key: String, finished: bool },
    /// The two picked tiles did not match; they stay selected until the clear fires.
    Mismatched {
        ticket: ClearTicket,
        clear_after_ms: u32,
    },
}

/// The matching game engine.
#[derive(Debug, Clone)]
pub struct Session {
    corpus: Corpus,
    config: SessionConfig,
    rng: SimpleRng,
    /// Generation of the current round (0 before the first deal).
    round: u64,
    tiles: Vec<Tile>,
    /// Solved pair keys in the order they were solved.
    matched: Vec<String>,
    pending: ArrayVec<TileId, 2>,
    mistakes: u32,
    /// Mismatches seen over the whole session; numbers clear tickets.
    mismatch_seq: u32,
    phase: Phase,
    last_outcome: Option<Outcome>,
    scheduled_clear: Option<ScheduledClear>,
}

impl Session {
    /// Create a session in the menu phase.
    ///
    /// The corpus size is only checked when a round is dealt.
    pub fn new(corpus: Corpus, config: SessionConfig) -> Result<Self, CoreError> {
        if config.subset_size == 0 {
            return Err(CoreError::EmptySubset);
        }

        Ok(Self::from_parts(corpus, config))
    }

    /// Create a session with default round settings and the given seed.
    pub fn with_seed(corpus: Corpus, seed: u32) -> Self {
        Self::from_parts(
            corpus,
            SessionConfig {
                seed,
                ..SessionConfig::default()
            },
        )
    }

    fn from_parts(corpus: Corpus, config: SessionConfig) -> Self {
        Self {
            corpus,
            rng: SimpleRng::new(config.seed),
            config,
            round: 0,
            tiles: Vec::new(),
            matched: Vec::new(),
            pending: ArrayVec::new(),
            mistakes: 0,
            mismatch_seq: 0,
            phase: Phase::Menu,
            last_outcome: None,
            scheduled_clear: None,
        }
    }

    /// Deal a new round and enter the playing phase.
    ///
    /// Draws `subset_size` distinct entries (shuffle the corpus, take the
    /// front), makes a source and a target tile for each, and shuffles the
    /// tiles. All per-round state is reset and any scheduled clear dropped.
    /// Allowed from every phase. Returns the new round generation.
    pub fn start_round(&mut self) -> Result<u64, CoreError> {
        let requested = self.config.subset_size;
        let available = self.corpus.len();
        if available < requested {
            return Err(CoreError::InsufficientCorpus {
                available,
                requested,
            });
        }

        let mut order: Vec<usize> = (0..available).collect();
        self.rng.shuffle(&mut order);
        order.truncate(requested);

        let round = self.round.wrapping_add(1);
        let mut tiles = Vec::with_capacity(requested * 2);
        for (slot, &index) in order.iter().enumerate() {
            let Some(entry) = self.corpus.get(index) else {
                continue;
            };
            let slot = (slot * 2) as u32;
            tiles.push(Tile {
                id: TileId::new(round, slot),
                text: entry.source.clone(),
                side: Side::Source,
                pair_key: entry.source.clone(),
            });
            tiles.push(Tile {
                id: TileId::new(round, slot + 1),
                text: entry.target.clone(),
                side: Side::Target,
                pair_key: entry.source.clone(),
            });
        }
        self.rng.shuffle(&mut tiles);

        self.round = round;
        self.tiles = tiles;
        self.matched.clear();
        self.pending.clear();
        self.mistakes = 0;
        self.last_outcome = None;
        self.scheduled_clear = None;
        self.phase = Phase::Playing;

        info!(round, pairs = requested, "round started");
        Ok(round)
    }

    /// Pick a tile.
    ///
    /// Ignored unless playing, and for unknown ids, tiles of solved pairs and
    /// tiles already picked. Picking while a mismatched pair is still shown
    /// drops that pair (and its scheduled clear) first. The second pick
    /// resolves immediately into a match or a mistake.
    pub fn select_tile(&mut self, id: TileId) -> Selection {
        if self.phase != Phase::Playing {
            trace!(%id, phase = self.phase.as_str(), "selection ignored: not playing");
            return Selection::Ignored;
        }

        let solved = match self.tile(id) {
            Some(tile) => self.is_matched(&tile.pair_key),
            None => {
                trace!(%id, "selection ignored: unknown tile");
                return Selection::Ignored;
            }
        };
        if solved || self.is_pending(id) {
            trace!(%id, solved, "selection ignored");
            return Selection::Ignored;
        }

        if self.pending.is_full() {
            self.scheduled_clear = None;
            self.pending.clear();
        }
        self.pending.push(id);

        if self.pending.len() == 1 {
            self.last_outcome = None;
            return Selection::Pending;
        }

        self.resolve_pair()
    }

    fn resolve_pair(&mut self) -> Selection {
        let (Some(first), Some(second)) = (self.tile(self.pending[0]), self.tile(self.pending[1]))
        else {
            self.pending.clear();
            return Selection::Ignored;
        };

        if first.pair_key == second.pair_key && first.side != second.side {
            let pair_key = first.pair_key.clone();
            self.matched.push(pair_key.clone());
            self.pending.clear();
            self.last_outcome = Some(Outcome::matched());

            let finished = self.matched.len() == self.total_pairs();
            if finished {
                self.phase = Phase::Finished;
                info!(round = self.round, mistakes = self.mistakes, "round finished");
            }
            debug!(round = self.round, pair = %pair_key, "pair matched");
            return Selection::Matched { pair_key, finished };
        }

        let source_text = [first, second]
            .into_iter()
            .find(|t| t.side == Side::Source)
            .map(|t| t.text.clone());
        self.last_outcome = Some(Outcome::mismatch(source_text.as_deref()));
        self.mistakes += 1;
        self.mismatch_seq = self.mismatch_seq.wrapping_add(1);

        let ticket = ClearTicket {
            round: self.round,
            mismatch: self.mismatch_seq,
        };
        let clear_after_ms = self.config.mismatch_clear_ms;
        self.scheduled_clear = Some(ScheduledClear {
            ticket,
            remaining_ms: clear_after_ms,
        });

        debug!(round = self.round, mistakes = self.mistakes, "pair mismatched");
        Selection::Mismatched {
            ticket,
            clear_after_ms,
        }
    }

    /// Advance the deferred-clear timer.
    ///
    /// Returns true when the scheduled clear fired during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(clear) = self.scheduled_clear.as_mut() else {
            return false;
        };

        clear.remaining_ms = clear.remaining_ms.saturating_sub(elapsed_ms);
        if clear.remaining_ms > 0 {
            return false;
        }

        let ticket = clear.ticket;
        self.expire_clear(ticket)
    }

    /// Fire a scheduled clear by ticket.
    ///
    /// Only the currently scheduled ticket has an effect; tickets from earlier
    /// rounds or superseded mismatches are no-ops.
    pub fn expire_clear(&mut self, ticket: ClearTicket) -> bool {
        match self.scheduled_clear {
            Some(clear) if clear.ticket == ticket => {
                self.scheduled_clear = None;
                self.pending.clear();
                debug!(round = ticket.round, mismatch = ticket.mismatch, "selection cleared");
                true
            }
            _ => {
                trace!(round = ticket.round, mismatch = ticket.mismatch, "stale clear ignored");
                false
            }
        }
    }

    /// Go back to the start screen. Round state is kept until the next deal.
    pub fn return_to_menu(&mut self) {
        self.phase = Phase::Menu;
    }

    pub fn is_matched(&self, pair_key: &str) -> bool {
        self.matched.iter().any(|k| k == pair_key)
    }

    pub fn is_pending(&self, id: TileId) -> bool {
        self.pending.contains(&id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile of the current round.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        if id.round() != self.round {
            return None;
        }
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Find the tile showing one side of a pair in the current round.
    pub fn find_tile(&self, pair_key: &str, side: Side) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|t| t.pair_key == pair_key && t.side == side)
    }

    pub fn pending(&self) -> &[TileId] {
        &self.pending
    }

    /// Solved pair keys, oldest first.
    pub fn matched_pairs(&self) -> &[String] {
        &self.matched
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Whether a mismatched pair is waiting to be deselected.
    pub fn clear_scheduled(&self) -> bool {
        self.scheduled_clear.is_some()
    }

    /// Solved share of the round, rounded to the nearest percent.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total_pairs();
        if total == 0 {
            return 0;
        }
        ((self.matched.len() * 100 + total / 2) / total) as u32
    }

    /// Write the render-facing view of the session into `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.phase = self.phase;
        out.round = self.round;
        out.mistakes = self.mistakes;
        out.matched_count = self.matched.len();
        out.total_pairs = self.total_pairs();
        out.progress_percent = self.progress_percent();
        out.clear_scheduled = self.clear_scheduled();
        out.last_outcome.clone_from(&self.last_outcome);

        out.tiles.truncate(self.tiles.len());
        for (i, tile) in self.tiles.iter().enumerate() {
            let view = TileSnapshot {
                id: tile.id,
                text: tile.text.clone(),
                side: tile.side,
                pair_key: tile.pair_key.clone(),
                matched: self.is_matched(&tile.pair_key),
                pending: self.is_pending(tile.id),
            };
            match out.tiles.get_mut(i) {
                Some(slot) => *slot = view,
                None => out.tiles.push(view),
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
