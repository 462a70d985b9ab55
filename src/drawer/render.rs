//! Drawing a region collection onto a [`Surface`].

use serde::{Deserialize, Serialize};

use super::RegionCollection;
use crate::constants::style;
use crate::geometry::{PixelPoint, VertexSpace};
use crate::surface::{CircleStyle, Color, PixelRect, Surface};

/// Colors and sizes used when drawing regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Edge, marker and label background color
    pub color: [u8; 3],
    /// Label text color
    pub text_color: [u8; 3],
    pub line_thickness: u32,
    pub marker_radius: u32,
    /// Radius of the ring drawn around the grabbed vertex
    pub selected_marker_radius: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: style::REGION_COLOR,
            text_color: style::TEXT_COLOR,
            line_thickness: style::LINE_THICKNESS,
            marker_radius: style::MARKER_RADIUS,
            selected_marker_radius: style::SELECTED_MARKER_RADIUS,
        }
    }
}

impl RegionCollection {
    /// Draw every region in name order.
    ///
    /// Vertices are scaled by the surface size at draw time. Each region gets
    /// its closed outline, a marker per vertex (a ring for the grabbed one)
    /// and its name on a filled box anchored at the topmost vertex.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, style: &RenderStyle) {
        if self.is_empty() {
            return;
        }

        let space = VertexSpace::new(surface.size());
        let surface_height = surface.size().height as i32;
        let color = Color::from(style.color);
        let text_color = Color::from(style.text_color);

        for region in self.regions() {
            let is_active = self.active == Some(region.id());
            let pixels: Vec<PixelPoint> = region.pixel_vertices(&space).collect();
            let n = pixels.len();

            let mut min_y = surface_height;
            let mut label_index = 0;
            for (k, &point) in pixels.iter().enumerate() {
                let next = pixels[(k + 1) % n];
                surface.draw_line(point, next, color, style.line_thickness);

                if is_active && self.selected_vertex == Some(k) {
                    surface.draw_circle(
                        point,
                        style.selected_marker_radius,
                        color,
                        CircleStyle::Outline,
                    );
                } else {
                    surface.draw_circle(point, style.marker_radius, color, CircleStyle::Filled);
                }

                if point.y < min_y {
                    min_y = point.y;
                    label_index = k;
                }
            }

            let anchor = pixels[label_index];
            let extent = surface.text_extent(region.name());
            surface.fill_rect(
                PixelRect::new(
                    anchor.x,
                    anchor.y.saturating_sub(extent.height + extent.baseline),
                    extent.width,
                    extent.height + 2 * extent.baseline,
                ),
                color,
            );
            surface.draw_text(region.name(), anchor, text_color);
        }
    }
}
