//! Canvas: grid-addressed drawing onto a fixed-size framebuffer.
//!
//! The canvas maps a `cols x rows` grid onto `width x height` pixels, where a
//! pixel is one terminal cell. Cell geometry is fractional: `col_width =
//! width / cols` and `row_height = height / rows`.

use thiserror::Error;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GridSize, SCORE_ANCHOR_COLS, SCORE_ANCHOR_ROWS};

/// Fill used by [`Canvas::draw_block`] and [`Canvas::draw_ball`] when no color is given.
pub const DEFAULT_FILL: Rgb = Rgb::new(0, 0, 128);

const BLOCK_GLYPH: char = '█';
const BALL_GLYPH: char = '●';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    /// Valid coordinates are `0..cols` and `0..rows`.
    #[error("cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        col: u16,
        row: u16,
        cols: u16,
        rows: u16,
    },
    #[error("canvas grid must be non-empty, got {cols}x{rows}")]
    EmptyGrid { cols: u16, rows: u16 },
    #[error("canvas surface must be non-empty, got {width}x{height}")]
    EmptySurface { width: u16, height: u16 },
}

/// Surface size in pixels (terminal cells).
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

/// Fixed-size drawing surface for one session.
#[derive(Debug, Clone)]
pub struct Canvas {
    fb: FrameBuffer,
    grid: GridSize,
    col_width: f32,
    row_height: f32,
}

impl Canvas {
    pub fn new(width: u16, height: u16, grid: GridSize) -> Result<Self, CanvasError> {
        if grid.is_empty() {
            return Err(CanvasError::EmptyGrid {
                cols: grid.cols,
                rows: grid.rows,
            });
        }
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height });
        }

        Ok(Self {
            fb: FrameBuffer::new(width, height),
            grid,
            col_width: width as f32 / grid.cols as f32,
            row_height: height as f32 / grid.rows as f32,
        })
    }

    pub fn for_viewport(viewport: Viewport, grid: GridSize) -> Result<Self, CanvasError> {
        Self::new(viewport.width, viewport.height, grid)
    }

    pub fn width(&self) -> u16 {
        self.fb.width()
    }

    pub fn height(&self) -> u16 {
        self.fb.height()
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn col_width(&self) -> f32 {
        self.col_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Mutable access for presenting (e.g. [`crate::TerminalRenderer::draw_swap`]).
    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    pub fn clear(&mut self) {
        self.fb.clear(Cell::default());
    }

    /// One-pixel stroke around the surface bounds.
    pub fn draw_border(&mut self) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200));
        let (w, h) = (self.fb.width(), self.fb.height());
        if w < 2 || h < 2 {
            self.fb.fill_rect(0, 0, w, h, BLOCK_GLYPH, style);
            return;
        }

        self.fb.put_char(0, 0, '┌', style);
        self.fb.put_char(w - 1, 0, '┐', style);
        self.fb.put_char(0, h - 1, '└', style);
        self.fb.put_char(w - 1, h - 1, '┘', style);

        for dx in 1..w - 1 {
            self.fb.put_char(dx, 0, '─', style);
            self.fb.put_char(dx, h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            self.fb.put_char(0, dy, '│', style);
            self.fb.put_char(w - 1, dy, '│', style);
        }
    }

    /// Pixel where the score text starts.
    pub fn score_anchor(&self) -> (u16, u16) {
        let x = self.fb.width() as f32 - SCORE_ANCHOR_COLS * self.col_width;
        let y = SCORE_ANCHOR_ROWS * self.row_height;
        (x.max(0.0) as u16, y as u16)
    }

    pub fn draw_score(&mut self, value: i64) {
        let (x, y) = self.score_anchor();
        let style = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        self.fb.put_i64(x, y, value, style);
    }

    /// Fill the rectangle covered by cell `(col, row)`.
    pub fn draw_block(&mut self, col: u16, row: u16, color: Option<Rgb>) -> Result<(), CanvasError> {
        self.check_bounds(col, row)?;
        let (x0, x1) = span(col, self.col_width);
        let (y0, y1) = span(row, self.row_height);
        let style = CellStyle::fg(color.unwrap_or(DEFAULT_FILL));
        self.fb.fill_rect(x0, y0, x1 - x0, y1 - y0, BLOCK_GLYPH, style);
        Ok(())
    }

    /// Fill the circle inscribed in cell `(col, row)`.
    ///
    /// The circle is centered on the cell and its radius is half the row height.
    /// Ball pixels use a distinct glyph from blocks. At least the center
    /// pixel is always drawn.
    pub fn draw_ball(&mut self, col: u16, row: u16, color: Option<Rgb>) -> Result<(), CanvasError> {
        self.check_bounds(col, row)?;
        let style = CellStyle::fg(color.unwrap_or(DEFAULT_FILL));

        let cx = (col as f32 + 0.5) * self.col_width;
        let cy = (row as f32 + 0.5) * self.row_height;
        let r = self.row_height / 2.0;

        let x_lo = (cx - r).floor().max(0.0) as u16;
        let x_hi = (cx + r).ceil() as u16;
        let y_lo = (cy - r).floor().max(0.0) as u16;
        let y_hi = (cy + r).ceil() as u16;

        let mut hits = 0usize;
        for py in y_lo..y_hi {
            for px in x_lo..x_hi {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.fb.put_char(px, py, BALL_GLYPH, style);
                    hits += 1;
                }
            }
        }

        if hits == 0 {
            self.fb.put_char(cx as u16, cy as u16, BALL_GLYPH, style);
        }
        Ok(())
    }

    fn check_bounds(&self, col: u16, row: u16) -> Result<(), CanvasError> {
        if col >= self.grid.cols || row >= self.grid.rows {
            return Err(CanvasError::OutOfBounds {
                col,
                row,
                cols: self.grid.cols,
                rows: self.grid.rows,
            });
        }
        Ok(())
    }
}

/// Pixel range `[start, end)` of grid index `i`, at least one pixel wide.
fn span(i: u16, size: f32) -> (u16, u16) {
    let start = (i as f32 * size).floor() as u16;
    let end = ((i as f32 + 1.0) * size).floor() as u16;
    (start, end.max(start.saturating_add(1)))
}
