//! Rendering layer — all terminal output lives here.
//!
//! The game composes each frame into a `Surface`; this module scales that
//! surface onto the terminal using half-block glyphs, two pixels per cell.
//! No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use soul_smasher::surface::Surface;

/// Surface pixels covered by one terminal cell in fullscreen mode.
const CELL_W: u32 = 8;
const CELL_H: u32 = 16;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// The "native" fullscreen resolution for a terminal of `cols`×`rows` cells.
pub fn native_resolution((cols, rows): (u16, u16)) -> (u32, u32) {
    (u32::from(cols) * CELL_W, u32::from(rows) * CELL_H)
}

/// Where the scaled surface lands on the terminal, in cells and
/// half-cell pixel rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    term: (u16, u16),
    surface: (u32, u32),
    left: u16,
    top: u16,
    cols: u16,
    pixel_rows: u32,
}

impl Layout {
    fn fit(term: (u16, u16), surface: (u32, u32)) -> Layout {
        let (tw, th) = (u32::from(term.0), u32::from(term.1) * 2);
        let (sw, sh) = (surface.0.max(1), surface.1.max(1));

        // Largest size that keeps the aspect ratio and fits both ways.
        let (cols, pixel_rows) = if tw * sh <= th * sw {
            (tw, (tw * sh / sw).max(1))
        } else {
            ((th * sw / sh).max(1), th)
        };
        let cell_rows = pixel_rows.div_ceil(2);

        Layout {
            term,
            surface,
            left: ((tw - cols.min(tw)) / 2) as u16,
            top: ((u32::from(term.1) - cell_rows.min(u32::from(term.1))) / 2) as u16,
            cols: cols as u16,
            pixel_rows,
        }
    }
}

/// Draws surfaces to the terminal, clearing it only when the layout moves.
#[derive(Default)]
pub struct Presenter {
    layout: Option<Layout>,
}

impl Presenter {
    pub fn new() -> Presenter {
        Presenter::default()
    }

    /// Present one complete frame.
    pub fn present<W: Write>(
        &mut self,
        out: &mut W,
        surface: &Surface,
        term: (u16, u16),
    ) -> std::io::Result<()> {
        let layout = Layout::fit(term, surface.size());
        if self.layout != Some(layout) {
            out.queue(style::ResetColor)?;
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.layout = Some(layout);
        }

        let (sw, sh) = surface.size();
        if sw == 0 || sh == 0 || layout.cols == 0 {
            return out.flush();
        }

        let sample = |col: u32, pixel_row: u32| -> Color {
            if pixel_row >= layout.pixel_rows {
                return Color::Black;
            }
            let sx = (col * sw / u32::from(layout.cols)).min(sw - 1);
            let sy = (pixel_row * sh / layout.pixel_rows).min(sh - 1);
            let [r, g, b] = surface.pixel(sx, sy);
            Color::Rgb { r, g, b }
        };

        for cell_row in 0..layout.pixel_rows.div_ceil(2) {
            out.queue(cursor::MoveTo(layout.left, layout.top + cell_row as u16))?;
            let mut last: Option<(Color, Color)> = None;
            for col in 0..u32::from(layout.cols) {
                let colors = (sample(col, cell_row * 2), sample(col, cell_row * 2 + 1));
                if last != Some(colors) {
                    out.queue(style::SetForegroundColor(colors.0))?;
                    out.queue(style::SetBackgroundColor(colors.1))?;
                    last = Some(colors);
                }
                out.queue(Print(HALF_BLOCK))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_terminal_draws_nothing() {
        let layout = Layout::fit((0, 0), (800, 600));
        assert_eq!((layout.left, layout.top, layout.cols), (0, 0, 0));

        let mut out = Vec::new();
        Presenter::new()
            .present(&mut out, &Surface::new(800, 600), (0, 0))
            .unwrap();
        assert!(!String::from_utf8_lossy(&out).contains(HALF_BLOCK));
    }

    #[test]
    fn wide_terminal_pillarboxes() {
        // 200 cols × 100 pixel rows; 4:3 surface is height-limited.
        let layout = Layout::fit((200, 50), (800, 600));
        assert_eq!(layout.pixel_rows, 100);
        assert_eq!(layout.cols, 133);
        assert_eq!(layout.left, 33);
        assert_eq!(layout.top, 0);
    }

    #[test]
    fn tall_terminal_letterboxes() {
        // 80 cols × 200 pixel rows; width-limited.
        let layout = Layout::fit((80, 100), (800, 600));
        assert_eq!(layout.cols, 80);
        assert_eq!(layout.pixel_rows, 60);
        assert_eq!(layout.left, 0);
        assert_eq!(layout.top, 35);
    }

    #[test]
    fn native_surface_fills_terminal() {
        let term = (100, 40);
        let layout = Layout::fit(term, native_resolution(term));
        assert_eq!((layout.left, layout.top), (0, 0));
        assert_eq!((layout.cols, layout.pixel_rows), (100, 80));
    }

    #[test]
    fn present_emits_one_glyph_per_cell() {
        let mut out = Vec::new();
        Presenter::new()
            .present(&mut out, &Surface::new(8, 8), (4, 2))
            .unwrap();
        let glyphs = String::from_utf8_lossy(&out).matches(HALF_BLOCK).count();
        assert_eq!(glyphs, 4 * 2);
    }
}
