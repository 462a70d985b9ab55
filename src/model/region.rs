//! Polygon region type.

use rand::Rng;

use crate::geometry::{NormDelta, NormPoint, PixelPoint, VertexSpace};

/// Stable handle of a region inside its collection.
///
/// Handles are never reused within one collection, so they survive renames.
pub type RegionId = u32;

/// A named closed polygon with a fixed number of normalized vertices.
///
/// Edges run `vertices[i] -> vertices[(i + 1) % n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    name: String,
    vertices: Vec<NormPoint>,
}

impl Region {
    /// Create a region from an explicit vertex list.
    /// Returns None if the list is empty.
    pub fn new(id: RegionId, name: impl Into<String>, vertices: Vec<NormPoint>) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        Some(Self {
            id,
            name: name.into(),
            vertices,
        })
    }

    /// Create a region with `count` vertices drawn uniformly from `[0, spread)`.
    ///
    /// A zero count is bumped to one vertex.
    pub fn with_random_vertices<R: Rng + ?Sized>(
        id: RegionId,
        name: impl Into<String>,
        count: usize,
        spread: f32,
        rng: &mut R,
    ) -> Self {
        let vertices = (0..count.max(1))
            .map(|_| NormPoint::new(rng.random_range(0.0..spread), rng.random_range(0.0..spread)))
            .collect();
        Self {
            id,
            name: name.into(),
            vertices,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn vertices(&self) -> &[NormPoint] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Add a normalized delta to one vertex.
    /// Returns false if the index is out of range.
    pub fn displace_vertex(&mut self, index: usize, delta: NormDelta) -> bool {
        match self.vertices.get_mut(index) {
            Some(vertex) => {
                *vertex = vertex.offset(delta);
                true
            }
            None => false,
        }
    }

    /// Replace the whole polygon. Empty lists are rejected.
    pub fn replace_vertices(&mut self, vertices: Vec<NormPoint>) -> bool {
        if vertices.is_empty() {
            return false;
        }
        self.vertices = vertices;
        true
    }

    /// Vertices converted to pixel space, in order.
    pub fn pixel_vertices(&self, space: &VertexSpace) -> impl Iterator<Item = PixelPoint> + '_ {
        let space = *space;
        self.vertices.iter().map(move |v| space.to_pixel(*v))
    }
}
