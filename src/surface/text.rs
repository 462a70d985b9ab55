//! Label text shaping with `cosmic-text`.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};

use super::{Color, TextExtent};
use crate::constants::style;
use crate::geometry::PixelPoint;

/// Font database, glyph cache and metrics for one line of label text.
///
/// Fonts come from the system font directories. Without any installed face
/// labels measure as empty and draw nothing.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    metrics: Metrics,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::with_metrics(Metrics::new(style::LABEL_FONT_SIZE, style::LABEL_LINE_HEIGHT))
    }

    pub fn with_metrics(metrics: Metrics) -> Self {
        let font_system = FontSystem::new();
        if font_system.db().faces().next().is_none() {
            log::warn!("No system fonts found, labels will not be drawn");
        }
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            metrics,
        }
    }

    /// Whether at least one font face was loaded.
    pub fn has_fonts(&self) -> bool {
        self.font_system.db().faces().next().is_some()
    }

    fn layout(&mut self, text: &str) -> Buffer {
        let mut buffer = Buffer::new(&mut self.font_system, self.metrics);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
        );
        buffer
    }

    /// Width, ascent and descent of `text` on one line.
    pub fn measure(&mut self, text: &str) -> TextExtent {
        let buffer = self.layout(text);
        let Some(run) = buffer.layout_runs().next() else {
            return TextExtent::default();
        };
        let ascent = run.line_y - run.line_top;
        TextExtent {
            width: run.line_w.ceil() as i32,
            height: ascent.round() as i32,
            baseline: (self.metrics.line_height - ascent).round() as i32,
        }
    }

    /// Rasterize `text` with `origin` at the left end of the baseline.
    ///
    /// Every covered pixel span is handed to `fill` as `(x, y, width, height,
    /// coverage)` in target coordinates.
    pub fn draw<F>(&mut self, text: &str, origin: PixelPoint, color: Color, mut fill: F)
    where
        F: FnMut(i32, i32, u32, u32, u8),
    {
        let buffer = self.layout(text);
        let Some(baseline) = buffer.layout_runs().next().map(|run| run.line_y) else {
            return;
        };
        let dx = origin.x;
        let dy = origin.y.saturating_sub(baseline.round() as i32);

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            cosmic_text::Color::rgb(color.r, color.g, color.b),
            |x, y, w, h, glyph_color| {
                let coverage = glyph_color.a();
                if coverage > 0 {
                    fill(x.saturating_add(dx), y.saturating_add(dy), w, h, coverage);
                }
            },
        );
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
