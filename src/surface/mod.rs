//! Drawing surfaces the region collection renders onto.
//!
//! The collection only knows the [`Surface`] trait. Two implementations ship
//! with the crate:
//! - [`DrawList`] records draw commands, for tests and for window backends
//!   that want to replay them.
//! - [`ImageSurface`] rasterizes into an RGB image for preview files, with
//!   `tiny-skia` for shapes and `cosmic-text` for labels.

mod draw_list;
mod raster;
mod text;

pub use draw_list::{DrawCommand, DrawList, TextMetrics};
pub use raster::{ImageSurface, SurfaceError};
pub use text::TextRenderer;

use crate::geometry::{ImageSize, PixelPoint};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

/// How a circle marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleStyle {
    /// Solid disc.
    Filled,
    /// Ring one pixel wide.
    Outline,
}

/// Axis-aligned pixel rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Measured size of a single line of label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: i32,
    /// Height above the baseline.
    pub height: i32,
    /// Depth below the baseline.
    pub baseline: i32,
}

/// Something regions can be drawn onto.
pub trait Surface {
    /// Pixel size of the surface; normalized vertices are scaled by it.
    fn size(&self) -> ImageSize;

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, thickness: u32);

    fn draw_circle(&mut self, center: PixelPoint, radius: u32, color: Color, style: CircleStyle);

    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Measure one line of text as it would be drawn by [`Surface::draw_text`].
    fn text_extent(&mut self, text: &str) -> TextExtent;

    /// Draw text with `origin` at the left end of the baseline.
    fn draw_text(&mut self, text: &str, origin: PixelPoint, color: Color);
}
