//! Drawing surface abstraction.

use crate::Rgb;

/// Glyph weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Toggle between normal and bold.
    pub fn toggle(self) -> Self {
        match self {
            FontWeight::Normal => FontWeight::Bold,
            FontWeight::Bold => FontWeight::Normal,
        }
    }
}

/// Vertical anchor used when drawing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

/// Font selection for text drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    pub weight: FontWeight,
}

/// A 2D raster the renderer paints into.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Opacity is in `0.0..=1.0` and is applied as source-over blending.
pub trait Surface {
    /// Fill a rectangle with `color` at `opacity`.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, opacity: f32);

    /// Reset a rectangle to fully transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_font(&mut self, font: &FontSpec);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Draw `text` with its anchor at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, opacity: f32);
}
