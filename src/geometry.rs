//! Vertex-space math: normalized and pixel coordinates.
//!
//! Regions store their vertices as fractions of the image size so they stay
//! valid whatever resolution the image is shown at. Everything that touches
//! the pointer or the drawing surface converts through [`VertexSpace`].

use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates, nominally in `[0, 1] x [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displace the point by a normalized delta. No clamping is applied.
    pub fn offset(self, delta: NormDelta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }
}

/// A displacement in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormDelta {
    pub dx: f32,
    pub dy: f32,
}

/// A point in integer pixel coordinates of a specific image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pixel point.
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel dimensions of an image. A zero dimension means "not set yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Conversion between normalized and pixel space for one image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexSpace {
    size: ImageSize,
}

impl VertexSpace {
    pub fn new(size: ImageSize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Whether both dimensions are positive, i.e. delta conversion is defined.
    pub fn is_ready(&self) -> bool {
        !self.size.is_empty()
    }

    /// Scale a normalized point to pixels, truncating toward zero.
    pub fn to_pixel(&self, point: NormPoint) -> PixelPoint {
        PixelPoint::new(
            (point.x * self.size.width as f32) as i32,
            (point.y * self.size.height as f32) as i32,
        )
    }

    /// Convert the pixel movement `from -> to` into a normalized delta.
    ///
    /// Only relative movement is converted so repeated small drags do not
    /// accumulate truncation error. Returns `None` when the size is unset.
    pub fn to_normalized_delta(&self, from: PixelPoint, to: PixelPoint) -> Option<NormDelta> {
        if !self.is_ready() {
            return None;
        }
        let dx = (f64::from(to.x) - f64::from(from.x)) / f64::from(self.size.width);
        let dy = (f64::from(to.y) - f64::from(from.y)) / f64::from(self.size.height);
        Some(NormDelta {
            dx: dx as f32,
            dy: dy as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_to_pixel_truncates() {
        let space = VertexSpace::new(ImageSize::new(200, 100));
        assert_eq!(space.to_pixel(NormPoint::new(0.1, 0.2)), PixelPoint::new(20, 20));
        assert_eq!(space.to_pixel(NormPoint::new(0.4999, 0.999)), PixelPoint::new(99, 99));
        assert_eq!(space.to_pixel(NormPoint::new(0.0, 1.0)), PixelPoint::new(0, 100));
    }

    #[test]
    fn test_to_pixel_outside_unit_square() {
        let space = VertexSpace::new(ImageSize::new(100, 100));
        assert_eq!(space.to_pixel(NormPoint::new(1.5, -0.25)), PixelPoint::new(150, -25));
    }

    #[test]
    fn test_normalized_delta() {
        let space = VertexSpace::new(ImageSize::new(200, 400));
        let delta = space
            .to_normalized_delta(PixelPoint::new(20, 20), PixelPoint::new(25, 10))
            .unwrap();
        assert!(approx_eq(delta.dx, 0.025));
        assert!(approx_eq(delta.dy, -0.025));
    }

    #[test]
    fn test_normalized_delta_requires_size() {
        let space = VertexSpace::default();
        assert!(!space.is_ready());
        assert!(
            space
                .to_normalized_delta(PixelPoint::new(0, 0), PixelPoint::new(5, 5))
                .is_none()
        );

        let half = VertexSpace::new(ImageSize::new(100, 0));
        assert!(!half.is_ready());
    }

    #[test]
    fn test_pixel_distance() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
        assert_eq!(b.distance_to(&b), 0.0);
    }

    #[test]
    fn test_distance_between_extreme_points() {
        let a = PixelPoint::new(i32::MIN, 0);
        let b = PixelPoint::new(i32::MAX, 0);
        assert_eq!(a.distance_to(&b), 4_294_967_295.0);
        assert_eq!(b.distance_to(&a), a.distance_to(&b));
    }

    #[test]
    fn test_normalized_delta_between_extreme_points() {
        let space = VertexSpace::new(ImageSize::new(200, 200));
        let delta = space
            .to_normalized_delta(PixelPoint::new(i32::MIN, 20), PixelPoint::new(i32::MAX, 20))
            .unwrap();
        assert!(delta.dx.is_finite());
        assert!(delta.dx > 2.1e7);
        assert_eq!(delta.dy, 0.0);
    }

    #[test]
    fn test_offset_is_not_clamped() {
        let p = NormPoint::new(0.95, 0.05).offset(NormDelta { dx: 0.1, dy: -0.1 });
        assert!(approx_eq(p.x, 1.05));
        assert!(approx_eq(p.y, -0.05));
    }
}
