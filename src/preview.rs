//! Annotated preview images.

use image::RgbImage;

use crate::drawer::{RegionCollection, RenderStyle};
use crate::geometry::PixelPoint;
use crate::surface::{Color, ImageSurface, Surface, SurfaceError};

/// Left edge of the header text
const HEADER_X: i32 = 10;
/// Baseline of the lowest header line is `HEADER_TOP + HEADER_STEP * lines`
const HEADER_TOP: i32 = 15;
const HEADER_STEP: i32 = 30;

/// Draw the image header and every region of `collection` onto `image`.
///
/// The header lists the timestamp, file name and size, stacked upwards from
/// the timestamp. Fails only for an image with a zero dimension.
pub fn render_preview(
    image: RgbImage,
    name: &str,
    timestamp: &str,
    collection: &RegionCollection,
    style: &RenderStyle,
) -> Result<RgbImage, SurfaceError> {
    let mut surface = ImageSurface::from_image(image)?;
    let size = surface.size();

    let header = [
        timestamp.to_string(),
        format!("File: {}", name),
        format!("Size: {} x {}", size.width, size.height),
    ];
    let lines = header.len() as i32;
    for (i, text) in header.iter().enumerate() {
        let origin = PixelPoint::new(HEADER_X, HEADER_TOP + HEADER_STEP * (lines - i as i32));
        surface.draw_text(text, origin, Color::WHITE);
    }

    collection.render(&mut surface, style);
    Ok(surface.into_image())
}
