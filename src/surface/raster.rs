//! Raster surface backed by a `tiny_skia::Pixmap`.

use image::{Rgb, RgbImage};
use tiny_skia::{ColorU8, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::text::TextRenderer;
use super::{CircleStyle, Color, PixelRect, Surface, TextExtent};
use crate::geometry::{ImageSize, PixelPoint};

/// Errors that can occur when creating a raster surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Cannot draw on an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
}

/// Draws into an RGB image through `tiny-skia`.
///
/// Shapes are drawn without anti-aliasing so every covered pixel gets the
/// exact color. Pixel `(x, y)` is the unit square whose center is
/// `(x + 0.5, y + 0.5)`.
pub struct ImageSurface {
    pixmap: Pixmap,
    text: TextRenderer,
}

impl ImageSurface {
    /// A black canvas of the given size.
    pub fn new(size: ImageSize) -> Result<Self, SurfaceError> {
        Self::from_image(RgbImage::new(size.width, size.height))
    }

    /// Draw on top of an existing image.
    pub fn from_image(image: RgbImage) -> Result<Self, SurfaceError> {
        Self::with_text(image, TextRenderer::new())
    }

    /// Draw on top of an existing image, reusing a loaded font database.
    pub fn with_text(image: RgbImage, text: TextRenderer) -> Result<Self, SurfaceError> {
        let (width, height) = image.dimensions();
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(SurfaceError::EmptyImage { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], u8::MAX).premultiply();
        }
        Ok(Self { pixmap, text })
    }

    /// Color of one pixel, if it is inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgb(c.red(), c.green(), c.blue()))
    }

    pub fn into_image(self) -> RgbImage {
        self.into_parts().0
    }

    /// Hand the font database back for the next surface.
    pub fn into_parts(self) -> (RgbImage, TextRenderer) {
        let mut image = RgbImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgb([c.red(), c.green(), c.blue()]);
        }
        (image, self.text)
    }

    /// Whether a circle of `radius` around `(cx, cy)` can touch the surface.
    fn reaches(&self, cx: f64, cy: f64, radius: f64) -> bool {
        cx + radius >= 0.0
            && cy + radius >= 0.0
            && cx - radius <= f64::from(self.pixmap.width())
            && cy - radius <= f64::from(self.pixmap.height())
    }
}

fn paint(color: Color, alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = false;
    paint
}

fn pixel_center(point: PixelPoint) -> (f64, f64) {
    (f64::from(point.x) + 0.5, f64::from(point.y) + 0.5)
}

/// Cut the segment `a -> b` down to the box `lo..hi` (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies inside.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, a.0 - lo.0),
        (dx, hi.0 - a.0),
        (-dy, a.1 - lo.1),
        (dy, hi.1 - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

impl Surface for ImageSurface {
    fn size(&self) -> ImageSize {
        ImageSize::new(self.pixmap.width(), self.pixmap.height())
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, thickness: u32) {
        let width = thickness.max(1) as f32;
        let pad = f64::from(width) + 1.0;
        let lo = (-pad, -pad);
        let hi = (
            f64::from(self.pixmap.width()) + pad,
            f64::from(self.pixmap.height()) + pad,
        );
        let Some((a, b)) = clip_segment(pixel_center(from), pixel_center(to), lo, hi) else {
            return;
        };

        let mut builder = PathBuilder::new();
        builder.move_to(a.0 as f32, a.1 as f32);
        builder.line_to(b.0 as f32, b.1 as f32);
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color, u8::MAX),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn draw_circle(&mut self, center: PixelPoint, radius: u32, color: Color, style: CircleStyle) {
        let (cx, cy) = pixel_center(center);
        let r = f64::from(radius);
        if !self.reaches(cx, cy, r + 1.0) {
            return;
        }
        let (cx, cy, r) = (cx as f32, cy as f32, r as f32);

        let mut builder = PathBuilder::new();
        let fill_rule = match style {
            CircleStyle::Filled => {
                builder.push_circle(cx, cy, r.max(0.5));
                FillRule::Winding
            }
            CircleStyle::Outline => {
                builder.push_circle(cx, cy, r + 0.5);
                if r > 0.5 {
                    builder.push_circle(cx, cy, r - 0.5);
                }
                FillRule::EvenOdd
            }
        };
        let Some(path) = builder.finish() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color, u8::MAX),
            fill_rule,
            Transform::identity(),
            None,
        );
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let left = i64::from(rect.x).max(0);
        let top = i64::from(rect.y).max(0);
        let right = (i64::from(rect.x) + i64::from(rect.width)).min(i64::from(self.pixmap.width()));
        let bottom =
            (i64::from(rect.y) + i64::from(rect.height)).min(i64::from(self.pixmap.height()));
        if left >= right || top >= bottom {
            return;
        }
        let Some(rect) = Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color, u8::MAX), Transform::identity(), None);
    }

    fn text_extent(&mut self, text: &str) -> TextExtent {
        self.text.measure(text)
    }

    fn draw_text(&mut self, text: &str, origin: PixelPoint, color: Color) {
        let pixmap = &mut self.pixmap;
        self.text.draw(text, origin, color, |x, y, w, h, coverage| {
            if let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) {
                pixmap.fill_rect(rect, &paint(color, coverage), Transform::identity(), None);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color::rgb(0, 255, 0);

    fn surface(width: u32, height: u32) -> ImageSurface {
        ImageSurface::new(ImageSize::new(width, height)).unwrap()
    }

    fn pixel(surface: &ImageSurface, x: u32, y: u32) -> Color {
        surface.pixel(x, y).unwrap()
    }

    #[test]
    fn test_size_matches_image() {
        let surface = surface(32, 16);
        assert_eq!(surface.size(), ImageSize::new(32, 16));
        assert_eq!(surface.pixel(32, 0), None);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let err = ImageSurface::new(ImageSize::new(0, 10)).err();
        assert!(matches!(
            err,
            Some(SurfaceError::EmptyImage {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_image_roundtrip_keeps_pixels() {
        let mut image = RgbImage::new(4, 4);
        image.put_pixel(1, 2, Rgb([10, 20, 30]));
        let surface = ImageSurface::from_image(image).unwrap();
        assert_eq!(pixel(&surface, 1, 2), Color::rgb(10, 20, 30));
        assert_eq!(surface.into_image().get_pixel(1, 2).0, [10, 20, 30]);
    }

    #[test]
    fn test_horizontal_line() {
        let mut surface = surface(20, 20);
        surface.draw_line(PixelPoint::new(2, 5), PixelPoint::new(10, 5), GREEN, 1);
        for x in 2..=10 {
            assert_eq!(pixel(&surface, x, 5), GREEN);
        }
        assert_eq!(pixel(&surface, 12, 5), Color::BLACK);
        assert_eq!(pixel(&surface, 5, 7), Color::BLACK);
    }

    #[test]
    fn test_thick_line_covers_neighbours() {
        let mut surface = surface(20, 20);
        surface.draw_line(PixelPoint::new(2, 5), PixelPoint::new(10, 5), GREEN, 3);
        assert_eq!(pixel(&surface, 5, 4), GREEN);
        assert_eq!(pixel(&surface, 5, 6), GREEN);
        assert_eq!(pixel(&surface, 5, 8), Color::BLACK);
    }

    #[test]
    fn test_clipping_does_not_panic() {
        let mut surface = surface(10, 10);
        surface.draw_line(PixelPoint::new(-20, -20), PixelPoint::new(30, 30), GREEN, 2);
        surface.draw_circle(PixelPoint::new(0, 0), 8, GREEN, CircleStyle::Filled);
        surface.fill_rect(PixelRect::new(-5, -5, 30, 3), GREEN);
        surface.draw_text("edge", PixelPoint::new(8, 2), GREEN);
        assert_eq!(pixel(&surface, 0, 0), GREEN);
    }

    #[test]
    fn test_extreme_coordinates_are_clipped() {
        let mut surface = surface(100, 100);
        surface.draw_line(
            PixelPoint::new(i32::MIN, 50),
            PixelPoint::new(i32::MAX, 50),
            GREEN,
            2,
        );
        assert_eq!(pixel(&surface, 0, 50), GREEN);
        assert_eq!(pixel(&surface, 99, 50), GREEN);

        surface.draw_circle(PixelPoint::new(i32::MAX, i32::MIN), 8, GREEN, CircleStyle::Filled);
        surface.fill_rect(PixelRect::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX), GREEN);
        surface.fill_rect(PixelRect::new(i32::MIN, 0, i32::MAX, 10), GREEN);
        assert_eq!(pixel(&surface, 0, 5), Color::BLACK);
    }

    #[test]
    fn test_filled_and_outline_circles() {
        let mut filled = surface(30, 30);
        filled.draw_circle(PixelPoint::new(15, 15), 8, GREEN, CircleStyle::Filled);
        assert_eq!(pixel(&filled, 15, 15), GREEN);
        assert_eq!(pixel(&filled, 20, 15), GREEN);
        assert_eq!(pixel(&filled, 0, 0), Color::BLACK);

        let mut ring = surface(30, 30);
        ring.draw_circle(PixelPoint::new(15, 15), 8, GREEN, CircleStyle::Outline);
        assert_eq!(pixel(&ring, 15, 15), Color::BLACK);
        assert_eq!(pixel(&ring, 23, 15), GREEN);
        assert_eq!(pixel(&ring, 15, 7), GREEN);
    }

    #[test]
    fn test_fill_rect_is_exact() {
        let mut surface = surface(10, 10);
        surface.fill_rect(PixelRect::new(2, 3, 4, 2), GREEN);
        assert_eq!(pixel(&surface, 2, 3), GREEN);
        assert_eq!(pixel(&surface, 5, 4), GREEN);
        assert_eq!(pixel(&surface, 6, 4), Color::BLACK);
        assert_eq!(pixel(&surface, 2, 5), Color::BLACK);
    }

    #[test]
    fn test_text_extent_and_draw() {
        let mut surface = surface(120, 40);
        assert_eq!(surface.text_extent("").width, 0);
        if !surface.text.has_fonts() {
            return;
        }
        let extent = surface.text_extent("Label");
        assert!(extent.width > 0);
        assert!(extent.height > 0);

        surface.draw_text("Label", PixelPoint::new(5, 30), Color::WHITE);
        let lit = (0..120)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| pixel(&surface, x, y).g > 128)
            .count();
        assert!(lit > 0);
        // Nothing below the descender line
        assert!((0..120).all(|x| pixel(&surface, x, 39) == Color::BLACK));
    }
}
