//! SessionView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Layout is shared between drawing and mouse
//! hit-testing so a click always lands on the tile that was drawn there.

use crate::core::{SessionSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, GRID_COLUMNS, GRID_COLUMNS_NARROW, MISTAKE_WARN_THRESHOLD};

const TITLE: &str = "Verbos Reflexivos";
const SUBTITLE: &str = "Master the action of the self.";
const MENU_HEADING: &str = "Ready to test your memory?";
const MENU_BODY: &str = "We've selected a subset of reflexive verbs for you. Match the Spanish verb to its English translation to clear the board.";
const MENU_ACTION: &str = "[Enter] Start Review Session";
const FINISHED_HEADING: &str = "¡Buen Trabajo!";
const FINISHED_SUBHEADING: &str = "Session Complete";
const FINISHED_NEXT: &str = "[Enter] Next Set of Verbs";
const FINISHED_BACK: &str = "[M] Back to Start";
const TIP_HEADING: &str = "Pedagogical Tip:";
const TIP_BODY: &str = "\"Reflexive verbs show that the subject is both the doer and the receiver. Try saying the verb aloud with the pronoun 'Me' (e.g., 'Me cepillo') to reinforce the motor memory of the grammar pattern.\"";

const FOOTER_MENU: &str = "Enter start · q quit";
const FOOTER_PLAYING: &str = "←↑↓→ move · Enter pick · click pick · n new set · Esc menu · q quit";
const FOOTER_FINISHED: &str = "Enter next set · m menu · q quit";

/// First row of the phase body (below title and subtitle).
const BODY_Y: u16 = 3;
/// Rows above the grid while playing: progress, bar, feedback, spacer.
const GRID_Y: u16 = BODY_Y + 4;
/// Narrowest tile that still fits short verbs.
const MIN_TILE_W: u16 = 14;
const MAX_TILE_W: u16 = 26;
const TILE_H: u16 = 4;
const GAP_X: u16 = 1;
const PANEL_MAX_W: u16 = 64;

const BG: Rgb = Rgb::new(0, 0, 0);
const ACCENT: Rgb = Rgb::new(90, 160, 240);
const SUCCESS: Rgb = Rgb::new(100, 220, 120);
const ERROR: Rgb = Rgb::new(235, 90, 90);
const MUTED: Rgb = Rgb::new(140, 140, 150);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const CURSOR: Rgb = Rgb::new(240, 220, 80);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen rectangle of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl TileRect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// Grid geometry for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridLayout {
    x0: u16,
    y0: u16,
    tile_w: u16,
    columns: u16,
}

impl GridLayout {
    fn for_viewport(viewport: Viewport) -> Self {
        let columns = columns_for_width(viewport.width);
        let avail = viewport.width.saturating_sub(2);
        let gaps = GAP_X * (columns - 1);
        let tile_w = (avail.saturating_sub(gaps) / columns).clamp(1, MAX_TILE_W);
        let grid_w = tile_w * columns + gaps;
        Self {
            x0: viewport.width.saturating_sub(grid_w) / 2,
            y0: GRID_Y,
            tile_w,
            columns,
        }
    }

    fn rect(&self, index: usize) -> TileRect {
        let col = (index % self.columns as usize) as u16;
        let row = (index / self.columns as usize) as u16;
        TileRect {
            x: self.x0 + col * (self.tile_w + GAP_X),
            y: self.y0.saturating_add(row.saturating_mul(TILE_H)),
            w: self.tile_w,
            h: TILE_H,
        }
    }
}

fn columns_for_width(width: u16) -> u16 {
    let needed = MIN_TILE_W * GRID_COLUMNS + GAP_X * (GRID_COLUMNS - 1) + 2;
    if width >= needed {
        GRID_COLUMNS
    } else {
        GRID_COLUMNS_NARROW
    }
}

/// A lightweight terminal renderer for the matching game.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionView;

impl SessionView {
    pub fn new() -> Self {
        Self
    }

    /// Grid columns used at this viewport size (4, or 2 when narrow).
    pub fn columns_for(&self, viewport: Viewport) -> usize {
        columns_for_width(viewport.width) as usize
    }

    /// Screen rectangle of tile `index` at this viewport size.
    pub fn tile_rect(&self, viewport: Viewport, index: usize) -> TileRect {
        GridLayout::for_viewport(viewport).rect(index)
    }

    /// Index of the tile under terminal cell `(x, y)`, if any.
    ///
    /// Only meaningful while playing; other screens have no tiles.
    pub fn tile_at(
        &self,
        snap: &SessionSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<usize> {
        if snap.phase != Phase::Playing {
            return None;
        }
        let layout = GridLayout::for_viewport(viewport);
        (0..snap.tiles.len()).find(|&i| layout.rect(i).contains(x, y))
    }

    /// Render the session into an existing framebuffer.
    ///
    /// `cursor` is the keyboard-focused tile index.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: usize,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::fg(TEXT).into_cell(' '));

        self.draw_header(fb, viewport);
        match snap.phase {
            Phase::Menu => self.draw_menu(fb, viewport),
            Phase::Playing => self.draw_playing(fb, snap, cursor, viewport),
            Phase::Finished => self.draw_finished(fb, snap, viewport),
        }
        self.draw_footer(fb, snap.phase, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, cursor: usize, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        fb.put_str_centered(0, viewport.width, 0, TITLE, CellStyle::fg(ACCENT).bold());
        fb.put_str_centered(0, viewport.width, 1, SUBTITLE, CellStyle::fg(MUTED));
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, phase: Phase, viewport: Viewport) {
        if viewport.height <= BODY_Y {
            return;
        }
        let text = match phase {
            Phase::Menu => FOOTER_MENU,
            Phase::Playing => FOOTER_PLAYING,
            Phase::Finished => FOOTER_FINISHED,
        };
        fb.put_str_centered(
            0,
            viewport.width,
            viewport.height - 1,
            text,
            CellStyle::fg(MUTED).dim(),
        );
    }

    /// Centered panel `(x, w)` used by the menu and finished screens.
    fn panel(&self, viewport: Viewport) -> (u16, u16) {
        let w = viewport.width.saturating_sub(2).min(PANEL_MAX_W);
        (viewport.width.saturating_sub(w) / 2, w)
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let (x, w) = self.panel(viewport);
        let inner_x = x + 2;
        let inner_w = w.saturating_sub(4);
        let mut y = BODY_Y + 1;

        fb.put_str_centered(inner_x, inner_w, y, MENU_HEADING, CellStyle::fg(TEXT).bold());
        y += 2;
        y += fb.put_wrapped(inner_x, y, inner_w, 4, MENU_BODY, CellStyle::fg(MUTED));
        y += 1;
        fb.put_str_centered(
            inner_x,
            inner_w,
            y,
            MENU_ACTION,
            CellStyle::fg(BG).with_bg(ACCENT).bold(),
        );
        y += 2;

        fb.draw_box(x, BODY_Y, w, y - BODY_Y, CellStyle::fg(MUTED));
    }

    fn draw_playing(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        cursor: usize,
        viewport: Viewport,
    ) {
        let layout = GridLayout::for_viewport(viewport);
        let grid_w = layout.tile_w * layout.columns + GAP_X * (layout.columns - 1);
        let x = layout.x0;

        // Progress and mistakes.
        let label = CellStyle::fg(TEXT).bold();
        fb.put_str(x, BODY_Y, "Progress", label);
        let pct = format!("{}%", snap.progress_percent);

        let mistakes_style = if snap.mistakes > MISTAKE_WARN_THRESHOLD {
            CellStyle::fg(ERROR).bold()
        } else {
            CellStyle::fg(TEXT).bold()
        };
        let digits = snap.mistakes.checked_ilog10().unwrap_or(0) as u16 + 1;
        let mistakes_w = "MISTAKES ".len() as u16 + digits;
        let mx = (x + grid_w).saturating_sub(mistakes_w);
        let after = fb.put_str(mx, BODY_Y, "MISTAKES ", CellStyle::fg(MUTED));
        fb.put_u32(after, BODY_Y, snap.mistakes, mistakes_style);

        let pct_x = mx.saturating_sub(pct.chars().count() as u16 + 2);
        fb.put_str(pct_x, BODY_Y, &pct, label);

        // Progress bar.
        let filled = (grid_w as u32 * snap.progress_percent / 100) as u16;
        fb.fill_rect(x, BODY_Y + 1, filled, 1, '█', CellStyle::fg(ACCENT));
        fb.fill_rect(
            x + filled,
            BODY_Y + 1,
            grid_w - filled,
            1,
            '░',
            CellStyle::fg(MUTED).dim(),
        );

        // Feedback.
        if let Some(outcome) = &snap.last_outcome {
            let (mark, color) = if outcome.is_match() {
                ('✔', SUCCESS)
            } else {
                ('✖', ERROR)
            };
            let style = CellStyle::fg(color).bold();
            fb.put_char(x, BODY_Y + 2, mark, style);
            fb.put_str(x + 2, BODY_Y + 2, &outcome.message, style);
        }

        for (i, tile) in snap.tiles.iter().enumerate() {
            let rect = layout.rect(i);
            self.draw_tile(fb, tile, rect, i == cursor, snap.clear_scheduled);
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        tile: &TileSnapshot,
        rect: TileRect,
        focused: bool,
        mismatch_shown: bool,
    ) {
        if tile.matched {
            // Solved pairs fade out; keep a faint outline so the cursor stays visible.
            let style = if focused {
                CellStyle::fg(CURSOR).dim()
            } else {
                CellStyle::fg(Rgb::new(50, 50, 55)).dim()
            };
            fb.draw_box(rect.x, rect.y, rect.w, rect.h, style);
            return;
        }

        let fill = if tile.pending {
            if mismatch_shown {
                ERROR
            } else {
                ACCENT
            }
        } else {
            BG
        };
        let text_fg = if tile.pending { BG } else { TEXT };

        fb.fill_rect(
            rect.x + 1,
            rect.y + 1,
            rect.w.saturating_sub(2),
            rect.h.saturating_sub(2),
            ' ',
            CellStyle::fg(text_fg).with_bg(fill),
        );

        let border = if focused {
            CellStyle::fg(CURSOR).bold()
        } else if tile.pending {
            CellStyle::fg(fill)
        } else {
            CellStyle::fg(MUTED)
        };
        fb.draw_box(rect.x, rect.y, rect.w, rect.h, border);

        let mut text_style = CellStyle::fg(text_fg).with_bg(fill);
        if tile.pending {
            text_style = text_style.bold();
        }
        fb.put_wrapped(
            rect.x + 1,
            rect.y + 1,
            rect.w.saturating_sub(2),
            rect.h.saturating_sub(2),
            &tile.text,
            text_style,
        );
    }

    fn draw_finished(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) {
        let (x, w) = self.panel(viewport);
        let inner_x = x + 2;
        let inner_w = w.saturating_sub(4);
        let mut y = BODY_Y + 1;

        fb.put_str_centered(inner_x, inner_w, y, FINISHED_HEADING, CellStyle::fg(ACCENT).bold());
        y += 1;
        fb.put_str_centered(inner_x, inner_w, y, FINISHED_SUBHEADING, CellStyle::fg(MUTED));
        y += 2;

        // Stats side by side.
        let half = inner_w / 2;
        let caption = CellStyle::fg(MUTED);
        let value = CellStyle::fg(TEXT).bold();
        fb.put_str_centered(inner_x, half, y, "Verbs Mastered", caption);
        fb.put_str_centered(inner_x + half, half, y, "Mistakes", caption);
        y += 1;
        fb.put_str_centered(inner_x, half, y, &snap.total_pairs.to_string(), value);
        fb.put_str_centered(inner_x + half, half, y, &snap.mistakes.to_string(), value);
        y += 2;

        fb.put_str_centered(
            inner_x,
            inner_w,
            y,
            FINISHED_NEXT,
            CellStyle::fg(BG).with_bg(ACCENT).bold(),
        );
        y += 1;
        fb.put_str_centered(inner_x, inner_w, y, FINISHED_BACK, CellStyle::fg(ACCENT));
        y += 2;

        fb.put_str(inner_x, y, TIP_HEADING, CellStyle::fg(TEXT).bold());
        y += 1;
        y += fb.put_wrapped(inner_x, y, inner_w, 4, TIP_BODY, CellStyle::fg(MUTED).dim());
        y += 1;

        fb.draw_box(x, BODY_Y, w, y - BODY_Y, CellStyle::fg(MUTED));
    }
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::fb::Cell {
        crate::fb::Cell { ch, style: self }
    }
}
