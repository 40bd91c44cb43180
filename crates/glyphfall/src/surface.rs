//! A raster surface emulated on the terminal grid.

use glyphfall_core::{FontSpec, FontWeight, Rgb, Surface, TextBaseline};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

/// Terminal columns covered by one glyph cell, so full-width glyphs fit.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

/// Channel brightness below which a cell is shown as blank.
const VISIBLE_THRESHOLD: f32 = 8.0;

/// One glyph cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    /// Linear RGB in `0.0..=255.0`.
    rgb: [f32; 3],
    bold: bool,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        rgb: [0.0; 3],
        bold: false,
    };

    /// Source-over blend `color` at `opacity` onto this cell.
    fn blend(&mut self, color: Rgb, opacity: f32) {
        let src = [color.r, color.g, color.b];
        for (dst, src) in self.rgb.iter_mut().zip(src) {
            *dst = *dst * (1.0 - opacity) + f32::from(src) * opacity;
        }
    }

    fn is_visible(&self) -> bool {
        self.glyph != ' ' && self.rgb.iter().any(|&c| c >= VISIBLE_THRESHOLD)
    }

    fn color(&self) -> Color {
        let [r, g, b] = self.rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Color::Rgb(r, g, b)
    }
}

/// Terminal-backed [`Surface`].
///
/// Pixel coordinates are mapped onto glyph cells `cell_px` pixels square;
/// each glyph cell occupies [`TERMINAL_COLUMNS_PER_CELL`] terminal columns
/// and one terminal row.
#[derive(Debug)]
pub struct TerminalSurface {
    cell_px: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    bold: bool,
    baseline: TextBaseline,
}

impl TerminalSurface {
    pub fn new(cell_px: u32) -> Self {
        Self {
            cell_px: cell_px.max(1) as f32,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            bold: false,
            baseline: TextBaseline::Top,
        }
    }

    /// Match the surface to a terminal area, wiping its contents.
    pub fn resize(&mut self, term_width: u16, term_height: u16) {
        self.cols = usize::from(term_width / TERMINAL_COLUMNS_PER_CELL);
        self.rows = usize::from(term_height);
        self.cells = vec![Cell::EMPTY; self.cols * self.rows];
    }

    /// Surface size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let cell = self.cell_px as u32;
        let scale = |cells: usize| u32::try_from(cells).unwrap_or(u32::MAX).saturating_mul(cell);
        (scale(self.cols), scale(self.rows))
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Cells covered by a pixel span, clamped to `[0, limit)`.
    fn cell_span(&self, start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        let first = (start / self.cell_px).floor().max(0.0) as usize;
        let last = ((start + len) / self.cell_px).ceil().max(0.0) as usize;
        first.min(limit)..last.min(limit)
    }

    fn for_each_cell(&mut self, x: f32, y: f32, width: f32, height: f32, mut f: impl FnMut(&mut Cell)) {
        let cols = self.cell_span(x, width, self.cols);
        let rows = self.cell_span(y, height, self.rows);
        for row in rows {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    f(cell);
                }
            }
        }
    }

    /// The glyph row text drawn at pixel `y` lands on.
    fn text_row(&self, y: f32) -> f32 {
        let top = match self.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - self.cell_px / 2.0,
            TextBaseline::Alphabetic | TextBaseline::Bottom => y - self.cell_px,
        };
        (top / self.cell_px).floor()
    }

    /// Render the surface as one line of spans per terminal row.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let blank = " ".repeat(usize::from(TERMINAL_COLUMNS_PER_CELL));
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        if !cell.is_visible() {
                            return Span::raw(blank.clone());
                        }
                        let mut symbol = cell.glyph.to_string();
                        let width = cell.glyph.width().unwrap_or(1);
                        for _ in width..usize::from(TERMINAL_COLUMNS_PER_CELL) {
                            symbol.push(' ');
                        }
                        let mut style = Style::new().fg(cell.color());
                        if cell.bold {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        Span::styled(symbol, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        self.for_each_cell(x, y, width, height, |cell| cell.blend(color, opacity));
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.for_each_cell(x, y, width, height, |cell| *cell = Cell::EMPTY);
    }

    fn set_font(&mut self, font: &FontSpec) {
        // Terminal glyph size is fixed, only the weight carries over
        self.bold = font.weight == FontWeight::Bold;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, opacity: f32) {
        let row = self.text_row(y);
        let col = (x / self.cell_px).floor();
        if row < 0.0 || col < 0.0 {
            return;
        }

        let opacity = opacity.clamp(0.0, 1.0);
        let bold = self.bold;
        for (i, glyph) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col as usize + i, row as usize) {
                cell.blend(color, opacity);
                cell.glyph = glyph;
                cell.bold = bold;
            }
        }
    }
}
