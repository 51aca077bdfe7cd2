//! GameView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{SessionSnapshot, Tile, VictoryState};
use crate::fb::{digit_count, CellStyle, FrameBuffer, Rgb};
use crate::types::BOARD_SIZE;

const GRID_BG: Rgb = Rgb::hex(0xBBADA0);
const EMPTY_SLOT: Rgb = Rgb::hex(0xCDC1B4);
const TEXT_DARK: Rgb = Rgb::hex(0x776E65);
const TEXT_LIGHT: Rgb = Rgb::hex(0xF9F6F2);

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

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    /// Gap between tiles and around the board edge.
    gap: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 leaves room for five digits with a margin on each side.
        Self {
            cell_w: 7,
            cell_h: 3,
            gap: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Board frame placement within the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board size including the border.
    pub fn frame_size(&self) -> (u16, u16) {
        let n = BOARD_SIZE as u16;
        let inner_w = n * (self.cell_w + self.gap) + self.gap;
        let inner_h = n * (self.cell_h + self.gap) + self.gap;
        (inner_w + 2, inner_h + 2)
    }

    /// Render the current session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(GRID_BG, GRID_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, border);

        for y in 0..BOARD_SIZE as u16 {
            for x in 0..BOARD_SIZE as u16 {
                self.draw_empty_cell(fb, frame, x, y);
            }
        }

        // While sliding two tiles may share a cell; both carry the same value.
        for tile in snap.tiles.iter() {
            self.draw_tile(fb, frame, tile);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        // Overlays.
        if snap.victory == VictoryState::Won {
            self.draw_overlay_text(fb, frame, "YOU WIN!", "c: keep playing  r: new game");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER", "u: undo  r: new game");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top-left corner of the tile at board cell (x, y).
    pub fn cell_origin(&self, frame_x: u16, frame_y: u16, x: u16, y: u16) -> (u16, u16) {
        (
            frame_x + 1 + self.gap + x * (self.cell_w + self.gap),
            frame_y + 1 + self.gap + y * (self.cell_h + self.gap),
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let (px, py) = self.cell_origin(frame.x, frame.y, x, y);
        let style = CellStyle::new(EMPTY_SLOT, EMPTY_SLOT);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Frame, tile: &Tile) {
        let (px, py) = self.cell_origin(frame.x, frame.y, tile.x as u16, tile.y as u16);
        let bg = tile_color(tile.value);
        let style = CellStyle::new(text_color(tile.value), bg).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let mid_y = py + self.cell_h / 2;
        let digits = digit_count(tile.value);
        if digits <= self.cell_w {
            let x = px + (self.cell_w - digits) / 2;
            fb.put_u64(x, mid_y, tile.value, style);
        } else {
            // Too wide for the tile: show the exponent instead.
            let exp = u64::from(tile.value.trailing_zeros());
            let w = 2 + digit_count(exp);
            let x = px + self.cell_w.saturating_sub(w) / 2;
            fb.put_str(x, mid_y, "2^", style);
            fb.put_u64(x + 2, mid_y, exp, style);
        }

        if tile.is_new && self.cell_h >= 3 {
            fb.put_char(px + self.cell_w - 1, py, '*', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::default();
        let dim = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.high_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, u64::from(snap.move_count), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "UNDO", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, if snap.can_undo { "ready" } else { "-" }, value);
        y = y.saturating_add(2);

        let controls: &[&str] = if snap.victory == VictoryState::Won {
            &["c  keep playing", "r  new game", "q  quit"]
        } else {
            &["←↑→↓ hjkl wasd", "u  undo", "r  new game", "q  quit"]
        };
        for line in controls {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, title: &str, hint: &str) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint_style = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));

        let mid_y = frame.y.saturating_add(frame.h / 2);
        put_centered(fb, frame, mid_y.saturating_sub(1), title, style);
        put_centered(fb, frame, mid_y.saturating_add(1), hint, hint_style);
    }
}

/// Width reserved for the side panel when centering the board.
const PANEL_W: u16 = 18;

fn put_centered(fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

/// Tile background by value; values past 8192 share the darkest shade.
pub fn tile_color(value: u64) -> Rgb {
    match value {
        2 => Rgb::hex(0xEEE4DA),
        4 => Rgb::hex(0xEDE0C8),
        8 => Rgb::hex(0xF2B179),
        16 => Rgb::hex(0xF59563),
        32 => Rgb::hex(0xF67C5F),
        64 => Rgb::hex(0xF65E3B),
        128 => Rgb::hex(0xEDCF72),
        256 => Rgb::hex(0xEDCC61),
        512 => Rgb::hex(0xEDC850),
        1024 => Rgb::hex(0xEDC53F),
        2048 => Rgb::hex(0xEDC22E),
        4096 => Rgb::hex(0x3E3933),
        8192 => Rgb::hex(0x2C2A26),
        _ => Rgb::new(0, 0, 0),
    }
}

pub fn text_color(value: u64) -> Rgb {
    if value <= 4 {
        TEXT_DARK
    } else {
        TEXT_LIGHT
    }
}
