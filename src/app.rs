//! App controller - turns player commands into session calls.
//!
//! The meaning of a command depends on the phase: `Confirm` deals a round from
//! the menu and the finished screen, and picks the focused tile while playing.

use tracing::debug;

use crate::core::{CoreError, Selection, Session, SessionSnapshot};
use crate::input::GridCursor;
use crate::types::{Command, Phase};

pub struct App {
    session: Session,
    cursor: GridCursor,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor: GridCursor::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Index of the focused tile.
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    /// Follow the grid width chosen by the view.
    pub fn set_columns(&mut self, columns: usize) {
        self.cursor.set_columns(columns);
    }

    /// Apply one command.
    ///
    /// Only dealing a round can fail (corpus too small).
    pub fn apply(&mut self, command: Command) -> Result<(), CoreError> {
        let phase = self.session.phase();
        match (phase, command) {
            (_, Command::NewRound) | (Phase::Menu | Phase::Finished, Command::Confirm) => {
                self.deal()?;
            }
            (_, Command::BackToMenu) => self.session.return_to_menu(),
            (Phase::Playing, Command::Confirm) => {
                self.select_at(self.cursor.index());
            }
            (Phase::Playing, movement) => {
                self.cursor.apply(movement, self.session.tiles().len());
            }
            _ => debug!(command = command.as_str(), phase = phase.as_str(), "command ignored"),
        }
        Ok(())
    }

    /// Pick the tile at grid `index` (mouse click) and focus it.
    pub fn click(&mut self, index: usize) -> Selection {
        if self.session.phase() != Phase::Playing {
            return Selection::Ignored;
        }
        self.cursor.set_index(index, self.session.tiles().len());
        self.select_at(index)
    }

    /// Advance timers by `elapsed_ms`. Returns true if the session changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.session.tick(elapsed_ms)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    fn deal(&mut self) -> Result<(), CoreError> {
        self.session.start_round()?;
        self.cursor.reset();
        Ok(())
    }

    fn select_at(&mut self, index: usize) -> Selection {
        match self.session.tiles().get(index).map(|t| t.id) {
            Some(id) => self.session.select_tile(id),
            None => Selection::Ignored,
        }
    }
}
