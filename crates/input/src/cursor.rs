//! Keyboard cursor over the tile grid.

use crate::types::Command;

/// Row-major cursor over a grid of `len` cells laid out in `columns` columns.
///
/// Movement stops at the edges. The last row may be partial; moving down into
/// a missing cell lands on the last cell instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    index: usize,
    columns: usize,
}

impl GridCursor {
    pub fn new(columns: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Change the column count (e.g. after a terminal resize). The cell stays put.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Jump to a cell, clamped to the grid.
    pub fn set_index(&mut self, index: usize, len: usize) {
        self.index = index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Apply a movement command. Non-movement commands are ignored.
    ///
    /// Returns true if the cursor moved.
    pub fn apply(&mut self, command: Command, len: usize) -> bool {
        if len == 0 {
            self.index = 0;
            return false;
        }

        let last = len - 1;
        let current = self.index.min(last);
        let next = match command {
            Command::MoveLeft if current % self.columns > 0 => current - 1,
            Command::MoveRight if current % self.columns + 1 < self.columns => {
                (current + 1).min(last)
            }
            Command::MoveUp if current >= self.columns => current - self.columns,
            Command::MoveDown if current / self.columns < last / self.columns => {
                (current + self.columns).min(last)
            }
            _ => current,
        };

        let moved = next != self.index;
        self.index = next;
        moved
    }
}

impl Default for GridCursor {
    fn default() -> Self {
        Self::new(crate::types::GRID_COLUMNS as usize)
    }
}
