//! Recording surface.

use super::{CircleStyle, Color, PixelRect, Surface, TextExtent};
use crate::constants::style;
use crate::geometry::{ImageSize, PixelPoint};

/// Estimated font metrics for label text.
///
/// Real glyph shaping is up to whatever backend replays the list; these
/// ratios only have to be close enough to size the label background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Font size in pixels
    pub size: f32,
    /// Average character width as a ratio of font size
    pub char_width_ratio: f32,
    /// Descender depth as a ratio of font size
    pub baseline_ratio: f32,
}

impl TextMetrics {
    /// Metrics close to a small monospace label font.
    pub const LABEL: TextMetrics = TextMetrics {
        size: style::LABEL_FONT_SIZE,
        char_width_ratio: 0.6,
        baseline_ratio: 0.25,
    };

    /// Estimate the extent of a single line of text.
    pub fn measure(&self, text: &str) -> TextExtent {
        let chars = text.chars().count() as f32;
        TextExtent {
            width: (chars * self.size * self.char_width_ratio).round() as i32,
            height: self.size.round() as i32,
            baseline: (self.size * self.baseline_ratio).round() as i32,
        }
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::LABEL
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        thickness: u32,
    },
    Circle {
        center: PixelPoint,
        radius: u32,
        color: Color,
        style: CircleStyle,
    },
    Rect {
        rect: PixelRect,
        color: Color,
    },
    Text {
        text: String,
        origin: PixelPoint,
        color: Color,
    },
}

/// A surface that records every draw call in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: ImageSize,
    metrics: TextMetrics,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list for a surface of the given size.
    pub fn new(size: ImageSize) -> Self {
        Self {
            size,
            metrics: TextMetrics::default(),
            commands: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All recorded lines.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// All recorded circles.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Texts in the order they were drawn.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> ImageSize {
        self.size
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, thickness: u32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn draw_circle(&mut self, center: PixelPoint, radius: u32, color: Color, style: CircleStyle) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            style,
        });
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn text_extent(&mut self, text: &str) -> TextExtent {
        self.metrics.measure(text)
    }

    fn draw_text(&mut self, text: &str, origin: PixelPoint, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scales_with_length() {
        let metrics = TextMetrics::LABEL;
        let short = metrics.measure("ab");
        let long = metrics.measure("abcd");
        assert_eq!(long.width, short.width * 2);
        assert_eq!(short.height, 14);
        assert!(short.baseline > 0);
        assert_eq!(metrics.measure("").width, 0);
    }

    #[test]
    fn test_records_in_order() {
        let mut list = DrawList::new(ImageSize::new(10, 10));
        list.draw_line(PixelPoint::new(0, 0), PixelPoint::new(1, 1), Color::WHITE, 2);
        list.fill_rect(PixelRect::new(0, 0, 2, 2), Color::BLACK);
        list.draw_text("hi", PixelPoint::new(1, 1), Color::BLACK);

        assert_eq!(list.commands().len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Line { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Rect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["hi"]);

        list.clear();
        assert!(list.is_empty());
    }
}
