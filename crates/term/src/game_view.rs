//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{format_clock, CardSnapshot, GameSnapshot, Outcome};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{grid_columns, grid_rows};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the card grid lands in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Top-left corner of the frame border.
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub cols: u16,
    pub rows: u16,
    card_w: u16,
    card_h: u16,
    gap_x: u16,
    gap_y: u16,
}

impl GridLayout {
    fn pitch_x(&self) -> u16 {
        self.card_w + self.gap_x
    }

    fn pitch_y(&self) -> u16 {
        self.card_h + self.gap_y
    }

    /// Top-left terminal cell of card `index`.
    pub fn card_origin(&self, index: usize) -> (u16, u16) {
        let col = (index % self.cols as usize) as u16;
        let row = (index / self.cols as usize) as u16;
        let x = self.start_x + 1 + self.gap_x + col * self.pitch_x();
        let y = self.start_y + 1 + self.gap_y + row * self.pitch_y();
        (x, y)
    }

    /// Card under terminal cell `(x, y)`, if any.
    pub fn card_at(&self, card_count: usize, x: u16, y: u16) -> Option<usize> {
        let rel_x = x.checked_sub(self.start_x + 1 + self.gap_x)?;
        let rel_y = y.checked_sub(self.start_y + 1 + self.gap_y)?;
        if rel_x % self.pitch_x() >= self.card_w || rel_y % self.pitch_y() >= self.card_h {
            return None;
        }
        let col = rel_x / self.pitch_x();
        let row = rel_y / self.pitch_y();
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        (index < card_count).then_some(index)
    }
}

/// A lightweight terminal renderer for the card table.
pub struct GameView {
    /// Card width in terminal columns.
    card_w: u16,
    /// Card height in terminal rows.
    card_h: u16,
    gap_x: u16,
    gap_y: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 reads roughly square with typical terminal glyph aspect ratio.
        Self {
            card_w: 7,
            card_h: 3,
            gap_x: 1,
            gap_y: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const TABLE_BG: Rgb = Rgb::new(20, 40, 30);
const WON_FG: Rgb = Rgb::new(255, 215, 0);
const LOST_FG: Rgb = Rgb::new(220, 50, 50);

/// Accent colour for a finished game: gold for a win, red for a loss.
pub fn outcome_color(outcome: Outcome) -> Rgb {
    match outcome {
        Outcome::Won => WON_FG,
        Outcome::Lost => LOST_FG,
        Outcome::InProgress => Rgb::new(220, 220, 220),
    }
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w: card_w.max(1),
            card_h: card_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, card_count: usize, viewport: Viewport) -> GridLayout {
        let cols = grid_columns(card_count) as u16;
        let rows = grid_rows(card_count) as u16;
        let frame_w = cols * (self.card_w + self.gap_x) + self.gap_x + 2;
        let frame_h = rows * (self.card_h + self.gap_y) + self.gap_y + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        GridLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            cols,
            rows,
            card_w: self.card_w,
            card_h: self.card_h,
            gap_x: self.gap_x,
            gap_y: self.gap_y,
        }
    }

    /// Card under a terminal cell (mouse hit-testing).
    pub fn card_at(&self, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<usize> {
        self.layout(snap.card_count(), viewport)
            .card_at(snap.card_count(), x, y)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.card_count(), viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(TABLE_BG, TABLE_BG),
        );
        fb.draw_box(
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );
        fb.put_str_centered(
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            " MEMORY ",
            border.bold(),
        );

        for (i, card) in snap.cards.iter().enumerate() {
            let (x, y) = layout.card_origin(i);
            self.draw_card(fb, x, y, card);
            if cursor == Some(i) {
                self.draw_cursor(fb, x, y);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.overlay_visible {
            self.draw_overlay(fb, viewport, &layout, snap.outcome);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<usize>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_card(&self, fb: &mut FrameBuffer, x: u16, y: u16, card: &CardSnapshot) {
        if !card.flipped {
            let back = CellStyle::new(Rgb::new(90, 100, 170), Rgb::new(40, 50, 110));
            fb.fill_rect(x, y, self.card_w, self.card_h, '░', back);
            return;
        }

        let face = if card.matched {
            CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(50, 130, 70)).bold()
        } else {
            CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(230, 230, 220)).bold()
        };
        fb.fill_rect(x, y, self.card_w, self.card_h, ' ', face);

        let digits = if card.value >= 10 { 2 } else { 1 };
        let vx = x + self.card_w.saturating_sub(digits) / 2;
        let vy = y + self.card_h / 2;
        fb.put_u32(vx, vy, card.value as u32, face);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(255, 230, 80), TABLE_BG).bold();
        let mid = y + self.card_h / 2;
        if x > 0 {
            fb.put_char(x - 1, mid, '▶', style);
        }
        fb.put_char(x + self.card_w, mid, '◀', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &GridLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "TIME LEFT", label);
        y = y.saturating_add(1);
        let clock = format_clock(snap.remaining_secs);
        let clock_style = if snap.remaining_secs <= 10 && snap.timer_active {
            CellStyle { fg: LOST_FG, ..value }.bold()
        } else {
            value
        };
        fb.put_str(panel_x, y, clock.as_str(), clock_style);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MATCHED", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, snap.matched_cards, value);
        fb.put_char(panel_x + w, y, '/', value);
        fb.put_u32(panel_x + w + 1, y, snap.card_count() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        let status = if !snap.playable() {
            snap.outcome.as_str()
        } else if snap.timer_active {
            "playing"
        } else {
            "ready"
        };
        fb.put_str(
            panel_x,
            y,
            status,
            CellStyle {
                fg: outcome_color(snap.outcome),
                ..value
            },
        );
        y = y.saturating_add(2);

        for line in ["arrows move", "space  flip", "r      restart", "q      quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    /// The box is centered on the board but sized against the viewport, so
    /// the message stays whole even when the board is narrower than it.
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        layout: &GridLayout,
        outcome: Outcome,
    ) {
        let message = outcome.message();
        let hint = "press r to play again";
        let text_w = message.chars().count().max(hint.chars().count()) as u16;
        let box_w = (text_w + 4).min(viewport.width);
        let box_h = 5u16.min(viewport.height);

        let center_x = layout.start_x + layout.frame_w / 2;
        let center_y = layout.start_y + layout.frame_h / 2;
        let x = center_x
            .saturating_sub(box_w / 2)
            .min(viewport.width.saturating_sub(box_w));
        let y = center_y
            .saturating_sub(box_h / 2)
            .min(viewport.height.saturating_sub(box_h));

        let accent = outcome_color(outcome);
        let panel = CellStyle::new(accent, Rgb::new(0, 0, 0));
        fb.fill_rect(x, y, box_w, box_h, ' ', panel);
        fb.draw_box(x, y, box_w, box_h, panel.bold());
        fb.put_str_centered(x, y + 1, box_w, message, panel.bold());
        fb.put_str_centered(
            x,
            y + 3,
            box_w,
            hint,
            CellStyle::new(Rgb::new(180, 180, 180), Rgb::new(0, 0, 0)).dim(),
        );
    }
}
