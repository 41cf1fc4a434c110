//! GameView: maps a core [`Frame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CellKind, Frame};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Phase;

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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const EMPTY_STYLE: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
const WALL_STYLE: CellStyle = CellStyle::new(Rgb::new(110, 110, 120), BOARD_BG);
const SETTLED_STYLE: CellStyle = CellStyle::new(Rgb::new(153, 153, 153), BOARD_BG);
const PART_STYLE: CellStyle = CellStyle::new(Rgb::new(240, 220, 80), BOARD_BG).bold();
const LABEL_STYLE: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
const VALUE_STYLE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const OVERLAY_STYLE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();

const INTRO_HELP: [(&str, &str); 5] = [
    ("Left / Right", "move"),
    ("Down", "drop faster"),
    ("Up / Space", "rotate"),
    ("Enter / Esc", "pause"),
    ("Q", "quit"),
];

/// A lightweight terminal renderer for the board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Top-left corner of the board for a grid of the frame's size.
    pub fn board_origin(&self, frame: &Frame<'_>, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.board_size(frame);
        (
            viewport.width.saturating_sub(w) / 2,
            viewport.height.saturating_sub(h) / 2,
        )
    }

    fn board_size(&self, frame: &Frame<'_>) -> (u16, u16) {
        let w = (frame.grid.cols() as u16).saturating_mul(self.cell_w);
        let h = frame.grid.rows() as u16;
        (w, h)
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, frame: &Frame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (start_x, start_y) = self.board_origin(frame, viewport);
        let (board_w, board_h) = self.board_size(frame);

        for row in 0..frame.grid.rows() {
            for col in 0..frame.grid.cols() {
                let (ch, style) = match frame.cell(row, col) {
                    CellKind::Empty => ('·', EMPTY_STYLE),
                    CellKind::Wall => ('▓', WALL_STYLE),
                    CellKind::Settled => ('█', SETTLED_STYLE),
                    CellKind::Part => ('█', PART_STYLE),
                };
                let x = start_x.saturating_add((col as u16).saturating_mul(self.cell_w));
                let y = start_y.saturating_add(row as u16);
                fb.fill_rect(x, y, self.cell_w, 1, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(board_w).saturating_add(2);
        self.draw_side_panel(fb, frame, viewport, panel_x, start_y);

        match frame.phase {
            Phase::Intro => self.draw_intro(fb, start_x, start_y, board_w, board_h),
            Phase::GameOver => {
                let mid = start_y.saturating_add(board_h / 2);
                draw_centered(fb, start_x, board_w, mid.saturating_sub(1), "GAME OVER");
                draw_centered(fb, start_x, board_w, mid.saturating_add(1), "Space: restart");
            }
            Phase::Playing if frame.paused() => {
                let mid = start_y.saturating_add(board_h / 2);
                draw_centered(fb, start_x, board_w, mid, "PAUSED");
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_intro(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, board_w: u16, board_h: u16) {
        let top = start_y.saturating_add(board_h / 4);
        draw_centered(fb, start_x, board_w, top, "BLOCKS");
        draw_centered(fb, start_x, board_w, top.saturating_add(2), "Space: start");

        let mut y = top.saturating_add(4);
        for (keys, action) in INTRO_HELP {
            let x = start_x.saturating_add(2);
            fb.put_str(x, y, keys, LABEL_STYLE);
            y = y.saturating_add(1);
            fb.put_str(x.saturating_add(2), y, action, VALUE_STYLE);
            y = y.saturating_add(1);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, frame: &Frame<'_>, viewport: Viewport, x: u16, start_y: u16) {
        if x >= viewport.width || viewport.width - x < 8 {
            return;
        }

        let mut y = start_y;
        fb.put_str(x, y, "ROWS", LABEL_STYLE);
        y = y.saturating_add(1);
        fb.put_u32(x, y, frame.rows_cleared, VALUE_STYLE);
        y = y.saturating_add(2);

        fb.put_str(x, y, "PARTS", LABEL_STYLE);
        y = y.saturating_add(1);
        fb.put_u32(x, y, frame.parts_spawned, VALUE_STYLE);
        y = y.saturating_add(2);

        fb.put_str(x, y, "STATE", LABEL_STYLE);
        y = y.saturating_add(1);
        let state = if frame.paused() { "paused" } else { frame.phase.as_str() };
        fb.put_str(x, y, state, VALUE_STYLE);
    }
}

fn draw_centered(fb: &mut FrameBuffer, start_x: u16, width: u16, y: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(width.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, OVERLAY_STYLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, Part};
    use crate::types::PieceKind;

    fn frame<'a>(grid: &'a Grid, part: Option<&'a Part>, phase: Phase, running: bool) -> Frame<'a> {
        Frame {
            phase,
            running,
            grid,
            part,
            rows_cleared: 12,
            parts_spawned: 34,
        }
    }

    #[test]
    fn board_is_centered_with_double_width_cells() {
        let grid = Grid::new(21, 12).unwrap();
        let f = frame(&grid, None, Phase::Playing, true);
        let view = GameView::default();
        assert_eq!(view.board_origin(&f, Viewport::new(80, 25)), (28, 2));

        let fb = view.render(&f, Viewport::new(80, 25));
        // Floor row: 12 cells, 2 columns each.
        let floor: String = fb.row_text(22).chars().skip(28).take(24).collect();
        assert_eq!(floor, "▓".repeat(24));
        assert_eq!(fb.get(28, 2).map(|c| c.ch), Some('▓'));
        assert_eq!(fb.get(30, 2).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn part_and_settled_cells_are_drawn() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.set(6, 1, 1);
        let part = Part::new(PieceKind::O, 2, 0);
        let f = frame(&grid, Some(&part), Phase::Playing, true);
        let fb = GameView::default().render(&f, Viewport::new(16, 8));

        // Origin is (0, 0); O covers rows 1..=2, columns 3..=4.
        let part_cell = fb.get(6, 1).unwrap();
        assert_eq!(part_cell.ch, '█');
        assert_eq!(part_cell.style, PART_STYLE);
        let settled = fb.get(2, 6).unwrap();
        assert_eq!(settled.style, SETTLED_STYLE);
    }

    #[test]
    fn overlays_follow_the_phase() {
        let grid = Grid::new(21, 12).unwrap();
        let view = GameView::default();
        let vp = Viewport::new(80, 25);
        let text = |fb: &FrameBuffer| (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");

        let intro = view.render(&frame(&grid, None, Phase::Intro, false), vp);
        assert!(text(&intro).contains("BLOCKS"));

        let paused = view.render(&frame(&grid, None, Phase::Playing, false), vp);
        assert!(text(&paused).contains("PAUSED"));

        let over = view.render(&frame(&grid, None, Phase::GameOver, false), vp);
        assert!(text(&over).contains("GAME OVER"));

        let playing = view.render(&frame(&grid, None, Phase::Playing, true), vp);
        assert!(!text(&playing).contains("PAUSED"));
    }

    #[test]
    fn side_panel_shows_counters() {
        let grid = Grid::new(21, 12).unwrap();
        let fb = GameView::default().render(&frame(&grid, None, Phase::Playing, true), Viewport::new(80, 25));
        assert!(fb.row_text(3).contains("12"));
        assert!(fb.row_text(6).contains("34"));
        assert!(fb.row_text(9).contains("playing"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let grid = Grid::new(21, 12).unwrap();
        let f = frame(&grid, None, Phase::Intro, false);
        let fb = GameView::default().render(&f, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
