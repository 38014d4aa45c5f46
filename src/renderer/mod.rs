//! Rendering
//!
//! The sim hands renderers a [`FrameSnapshot`] each frame; they draw it and
//! hold no game logic.

pub mod terminal;

pub use terminal::TerminalRenderer;

use glam::Vec2;

use crate::sim::FrameSnapshot;

/// Anything that can draw a frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot) -> std::io::Result<()>;
}

/// Rows above the playfield (HUD line + top border)
const TOP_ROWS: u16 = 2;
/// Rows below the playfield (bottom border + hint line)
const BOTTOM_ROWS: u16 = 2;

/// Maps the game area onto a terminal grid.
///
/// Row 0 is the HUD, row 1 the top border, the playfield follows, then the
/// bottom border and a hint line. Column 0 and the last column are borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub area: Vec2,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, area: Vec2) -> Self {
        Self { cols, rows, area }
    }

    /// Playfield size in cells (at least 1x1)
    pub fn inner(&self) -> (u16, u16) {
        (
            self.cols.saturating_sub(2).max(1),
            self.rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS).max(1),
        )
    }

    /// Game-area point at the centre of a playfield cell
    pub fn cell_to_area(&self, col: u16, row: u16) -> Option<Vec2> {
        let (w, h) = self.inner();
        if col < 1 || col > w || row < TOP_ROWS || row >= TOP_ROWS + h {
            return None;
        }
        let fx = (col - 1) as f32 + 0.5;
        let fy = (row - TOP_ROWS) as f32 + 0.5;
        Some(Vec2::new(
            fx / w as f32 * self.area.x,
            fy / h as f32 * self.area.y,
        ))
    }

    /// Playfield cell containing a game-area point (clamped to the field)
    pub fn area_to_cell(&self, p: Vec2) -> (u16, u16) {
        let (w, h) = self.inner();
        let cx = (p.x / self.area.x.max(1.0) * w as f32).floor() as i32;
        let cy = (p.y / self.area.y.max(1.0) * h as f32).floor() as i32;
        (
            1 + cx.clamp(0, w as i32 - 1) as u16,
            TOP_ROWS + cy.clamp(0, h as i32 - 1) as u16,
        )
    }

    /// Leftmost cell and row of a `width`-cell glyph centred on `p`, kept
    /// inside the side borders
    pub fn glyph_origin(&self, p: Vec2, width: u16) -> (u16, u16) {
        let (col, row) = self.area_to_cell(p);
        let max_col = self.cols.saturating_sub(1 + width).max(1);
        (col.saturating_sub(width / 2).clamp(1, max_col), row)
    }

    pub fn top_border_row(&self) -> u16 {
        TOP_ROWS - 1
    }

    pub fn bottom_border_row(&self) -> u16 {
        TOP_ROWS + self.inner().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_round_trip_lands_inside_frog() {
        let vp = Viewport::new(82, 32, Vec2::new(800.0, 600.0));
        let frog = Vec2::new(333.0, 217.0);
        let (col, row) = vp.area_to_cell(frog);
        let back = vp.cell_to_area(col, row).unwrap();
        // Half a cell of error at most, well inside a 25px minimum frog
        assert!((back - frog).abs().max_element() < 12.5);
    }

    #[test]
    fn test_borders_and_hud_are_outside() {
        let vp = Viewport::new(82, 32, Vec2::new(800.0, 600.0));
        assert_eq!(vp.cell_to_area(0, 10), None);
        assert_eq!(vp.cell_to_area(81, 10), None);
        assert_eq!(vp.cell_to_area(10, 0), None);
        assert_eq!(vp.cell_to_area(10, 1), None);
        assert_eq!(vp.cell_to_area(10, vp.bottom_border_row()), None);
        assert!(vp.cell_to_area(80, 29).is_some());
    }

    #[test]
    fn test_glyph_origin_stays_inside_borders() {
        let vp = Viewport::new(82, 32, Vec2::new(800.0, 600.0));
        assert_eq!(vp.glyph_origin(Vec2::new(405.0, 310.0), 3), (40, 16));
        assert_eq!(vp.glyph_origin(Vec2::new(0.0, 0.0), 3).0, 1);
        assert_eq!(vp.glyph_origin(Vec2::new(799.0, 0.0), 3).0, 78);
    }

    #[test]
    fn test_area_to_cell_clamps() {
        let vp = Viewport::new(82, 32, Vec2::new(800.0, 600.0));
        assert_eq!(vp.area_to_cell(Vec2::new(-50.0, -50.0)), (1, 2));
        assert_eq!(vp.area_to_cell(Vec2::new(5000.0, 5000.0)), (80, 29));
    }
}
