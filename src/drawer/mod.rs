//! Region collection: the polygon editor for one image.
//!
//! A [`RegionCollection`] owns the named regions of a single image together
//! with the interaction state (active region, grabbed vertex, last pointer
//! position). Pointer input arrives in pixel space and is converted through a
//! [`VertexSpace`] built from the image size.
//!
//! Editing is deliberately forgiving: an operation whose preconditions are
//! not met leaves the state untouched and reports why through
//! [`EditOutcome::Skipped`]. Nothing here returns an error.

mod render;


pub use render::RenderStyle;

use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HIT_THRESHOLD, DEFAULT_VERTEX_COUNT, INITIAL_VERTEX_SPREAD, VERTEX_DECIMALS,
};
use crate::format::single_quoted;
use crate::geometry::{ImageSize, NormPoint, PixelPoint, VertexSpace};
use crate::model::{Region, RegionId};

/// Construction parameters of a [`RegionCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Vertices generated for a new region
    pub vertex_count: usize,
    /// Pixel distance below which a press grabs a vertex
    pub hit_threshold: f64,
    /// Seed for the initial-vertex generator; `None` seeds from the OS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            vertex_count: DEFAULT_VERTEX_COUNT,
            hit_threshold: DEFAULT_HIT_THRESHOLD,
            seed: None,
        }
    }
}

impl DrawerConfig {
    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configuration for one image's collection.
    ///
    /// A fixed seed is mixed with the image name (FNV-1a) so every image gets
    /// its own vertex stream while runs stay reproducible.
    pub fn for_image(&self, name: &str) -> Self {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut config = self.clone();
        config.seed = self.seed.map(|seed| {
            name.bytes().fold(seed ^ FNV_OFFSET, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            })
        });
        config
    }
}

/// Named readiness predicates checked before an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// At least one region and an image size.
    Full,
    /// At least one region.
    HasRegions,
    /// An image size has been set.
    HasSize,
}

/// Why an edit left the collection unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotReady(Readiness),
    EmptyName,
    DuplicateName(String),
    UnknownRegion(String),
    EmptyRegion,
    NoActiveRegion,
    NoSelection,
    VertexOutOfRange(usize),
    NoVertexInRange,
}

/// Advisory result of an edit. Callers are free to ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Skipped(SkipReason),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Pointer input routed to the collection by the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(PixelPoint),
    Move(PixelPoint),
    Up,
}

/// The set of named regions for one image plus its editing state.
#[derive(Debug, Clone)]
pub struct RegionCollection {
    config: DrawerConfig,
    regions: HashMap<RegionId, Region>,
    /// Name index; its key order is the render, describe and delete-last order.
    names: BTreeMap<String, RegionId>,
    next_id: RegionId,
    space: VertexSpace,
    active: Option<RegionId>,
    selected_vertex: Option<usize>,
    last_pointer: PixelPoint,
    rng: Pcg32,
}

impl Default for RegionCollection {
    fn default() -> Self {
        Self::new(DrawerConfig::default())
    }
}

impl RegionCollection {
    pub fn new(config: DrawerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            regions: HashMap::new(),
            names: BTreeMap::new(),
            next_id: 1,
            space: VertexSpace::default(),
            active: None,
            selected_vertex: None,
            last_pointer: PixelPoint::default(),
            rng,
        }
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn image_size(&self) -> ImageSize {
        self.space.size()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Evaluate one readiness predicate.
    pub fn is_ready(&self, readiness: Readiness) -> bool {
        let has_regions = !self.is_empty();
        let has_size = self.space.is_ready();
        match readiness {
            Readiness::Full => has_regions && has_size,
            Readiness::HasRegions => has_regions,
            Readiness::HasSize => has_size,
        }
    }

    /// Look up a region by name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.names.get(name).and_then(|id| self.regions.get(id))
    }

    /// Regions in name order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.names.values().filter_map(|id| self.regions.get(id))
    }

    /// Region names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn active_region(&self) -> Option<&Region> {
        self.active.and_then(|id| self.regions.get(&id))
    }

    pub fn active_region_name(&self) -> Option<&str> {
        self.active_region().map(Region::name)
    }

    /// Index of the grabbed vertex in the active region, if any.
    pub fn selected_vertex(&self) -> Option<usize> {
        self.selected_vertex
    }

    pub fn last_pointer(&self) -> PixelPoint {
        self.last_pointer
    }

    /// Replace the image size. Normalized vertices are left as they are.
    pub fn set_image_size(&mut self, size: ImageSize) {
        self.space = VertexSpace::new(size);
    }

    /// Add a region with randomly placed vertices and make it active.
    pub fn add_region(&mut self, name: &str) -> EditOutcome {
        if let Some(reason) = self.check_insert(name) {
            return skip("add_region", reason);
        }

        let id = self.allocate_id();
        let region = Region::with_random_vertices(
            id,
            name,
            self.config.vertex_count,
            INITIAL_VERTEX_SPREAD,
            &mut self.rng,
        );
        self.regions.insert(id, region);
        self.names.insert(name.to_string(), id);
        self.active = Some(id);
        self.selected_vertex = None;

        log::info!("Added region '{}' ({} regions)", name, self.len());
        for (name, id) in &self.names {
            if let Some(region) = self.regions.get(id) {
                log::debug!("  |-- {}: {} vertices", name, region.vertex_count());
            }
        }
        EditOutcome::Applied
    }

    /// Add a region with the given vertices, e.g. when restoring saved work.
    /// The active region is not changed.
    pub fn insert_region(&mut self, name: &str, vertices: Vec<NormPoint>) -> EditOutcome {
        if let Some(reason) = self.check_insert(name) {
            return skip("insert_region", reason);
        }

        let id = self.next_id;
        let Some(region) = Region::new(id, name, vertices) else {
            return skip("insert_region", SkipReason::EmptyRegion);
        };
        self.next_id += 1;
        self.regions.insert(id, region);
        self.names.insert(name.to_string(), id);
        EditOutcome::Applied
    }

    /// Swap the whole polygon of an existing region.
    ///
    /// Identity, name and selection stay as they are; a grabbed index past
    /// the new vertex count makes later drags skip.
    pub fn replace_region(&mut self, name: &str, vertices: Vec<NormPoint>) -> EditOutcome {
        let Some(&id) = self.names.get(name) else {
            return skip("replace_region", SkipReason::UnknownRegion(name.to_string()));
        };
        match self.regions.get_mut(&id) {
            Some(region) => {
                if region.replace_vertices(vertices) {
                    EditOutcome::Applied
                } else {
                    skip("replace_region", SkipReason::EmptyRegion)
                }
            }
            None => skip("replace_region", SkipReason::UnknownRegion(name.to_string())),
        }
    }

    /// Remove the region whose name sorts last.
    pub fn delete_last_region(&mut self) -> EditOutcome {
        if !self.is_ready(Readiness::HasRegions) {
            return skip(
                "delete_last_region",
                SkipReason::NotReady(Readiness::HasRegions),
            );
        }
        let Some(name) = self.names.keys().next_back().cloned() else {
            return skip(
                "delete_last_region",
                SkipReason::NotReady(Readiness::HasRegions),
            );
        };
        self.remove_named(&name);
        EditOutcome::Applied
    }

    /// Remove a region by name.
    pub fn delete_region(&mut self, name: &str) -> EditOutcome {
        if !self.is_ready(Readiness::HasRegions) {
            return skip("delete_region", SkipReason::NotReady(Readiness::HasRegions));
        }
        if !self.names.contains_key(name) {
            return skip("delete_region", SkipReason::UnknownRegion(name.to_string()));
        }
        self.remove_named(name);
        EditOutcome::Applied
    }

    /// Give a region a new name, keeping its vertices and selection.
    ///
    /// If `new_name` already belongs to another region, that region is
    /// replaced by the renamed one.
    pub fn rename_region(&mut self, name: &str, new_name: &str) -> EditOutcome {
        if !self.is_ready(Readiness::HasRegions) {
            return skip("rename_region", SkipReason::NotReady(Readiness::HasRegions));
        }
        if new_name.is_empty() {
            return skip("rename_region", SkipReason::EmptyName);
        }
        let Some(&id) = self.names.get(name) else {
            return skip("rename_region", SkipReason::UnknownRegion(name.to_string()));
        };
        if name == new_name {
            return EditOutcome::Applied;
        }

        if self.names.contains_key(new_name) {
            log::debug!("Rename target '{}' exists, replacing it", new_name);
            self.remove_named(new_name);
        }
        self.names.remove(name);
        self.names.insert(new_name.to_string(), id);
        if let Some(region) = self.regions.get_mut(&id) {
            region.set_name(new_name);
        }

        log::info!("Region '{}' was assigned a new name '{}'", name, new_name);
        EditOutcome::Applied
    }

    /// Make the named region active. Unknown names leave no active region.
    pub fn set_active_region(&mut self, name: &str) {
        let target = self.names.get(name).copied();
        if target != self.active {
            self.selected_vertex = None;
        }
        self.active = target;
    }

    /// Grab the vertex nearest to `point`, if one lies within the threshold.
    ///
    /// Regions are scanned in name order and vertices in index order; a later
    /// vertex only wins with a strictly smaller distance. The pointer position
    /// is recorded whether or not anything was hit.
    pub fn select_vertex_at(&mut self, point: PixelPoint) -> EditOutcome {
        if !self.is_ready(Readiness::Full) {
            return skip("select_vertex_at", SkipReason::NotReady(Readiness::Full));
        }

        self.selected_vertex = None;
        let mut min_dist = self.config.hit_threshold;
        let mut best: Option<(RegionId, usize)> = None;
        for id in self.names.values() {
            let Some(region) = self.regions.get(id) else {
                continue;
            };
            for (index, vertex) in region.pixel_vertices(&self.space).enumerate() {
                let dist = point.distance_to(&vertex);
                if dist < min_dist {
                    min_dist = dist;
                    best = Some((*id, index));
                }
            }
        }
        self.last_pointer = point;

        match best {
            Some((id, index)) => {
                self.active = Some(id);
                self.selected_vertex = Some(index);
                log::trace!("Grabbed vertex {} at distance {:.1}", index, min_dist);
                EditOutcome::Applied
            }
            None => skip("select_vertex_at", SkipReason::NoVertexInRange),
        }
    }

    /// Move the grabbed vertex by the pointer movement since the last event.
    pub fn drag_selected_vertex(&mut self, point: PixelPoint) -> EditOutcome {
        if !self.is_ready(Readiness::Full) {
            return skip("drag_selected_vertex", SkipReason::NotReady(Readiness::Full));
        }
        let Some(id) = self.active else {
            return skip("drag_selected_vertex", SkipReason::NoActiveRegion);
        };
        let Some(index) = self.selected_vertex else {
            return skip("drag_selected_vertex", SkipReason::NoSelection);
        };
        let Some(delta) = self.space.to_normalized_delta(self.last_pointer, point) else {
            return skip("drag_selected_vertex", SkipReason::NotReady(Readiness::HasSize));
        };
        let Some(region) = self.regions.get_mut(&id) else {
            return skip("drag_selected_vertex", SkipReason::NoActiveRegion);
        };
        if !region.displace_vertex(index, delta) {
            return skip("drag_selected_vertex", SkipReason::VertexOutOfRange(index));
        }
        self.last_pointer = point;
        EditOutcome::Applied
    }

    /// Let go of the grabbed vertex. The active region stays active.
    pub fn release_selection(&mut self) {
        self.selected_vertex = None;
    }

    /// Route a pointer event to the matching edit.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditOutcome {
        match event {
            PointerEvent::Down(point) => self.select_vertex_at(point),
            PointerEvent::Move(point) => self.drag_selected_vertex(point),
            PointerEvent::Up => {
                self.release_selection();
                EditOutcome::Applied
            }
        }
    }

    /// One-line text form: size, ids and vertices with three decimals.
    ///
    /// `w: 200, h: 200, ids: ['r1'], vertices: [[[0.125, 0.125], [0.200, 0.100]]]`
    pub fn describe(&self) -> String {
        let size = self.image_size();
        let ids: Vec<String> = self.names.keys().map(|name| single_quoted(name)).collect();
        let polygons: Vec<String> = self
            .regions()
            .map(|region| {
                let points: Vec<String> = region
                    .vertices()
                    .iter()
                    .map(|v| format!("[{:.*}, {:.*}]", VERTEX_DECIMALS, v.x, VERTEX_DECIMALS, v.y))
                    .collect();
                format!("[{}]", points.join(", "))
            })
            .collect();
        format!(
            "w: {}, h: {}, ids: [{}], vertices: [{}]",
            size.width,
            size.height,
            ids.join(", "),
            polygons.join(", ")
        )
    }

    fn check_insert(&self, name: &str) -> Option<SkipReason> {
        if !self.is_ready(Readiness::HasSize) {
            Some(SkipReason::NotReady(Readiness::HasSize))
        } else if name.is_empty() {
            Some(SkipReason::EmptyName)
        } else if self.names.contains_key(name) {
            Some(SkipReason::DuplicateName(name.to_string()))
        } else {
            None
        }
    }

    fn allocate_id(&mut self) -> RegionId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn remove_named(&mut self, name: &str) {
        let Some(id) = self.names.remove(name) else {
            return;
        };
        self.regions.remove(&id);
        if self.active == Some(id) {
            self.active = None;
            self.selected_vertex = None;
        }
        log::info!("Deleted region '{}'", name);
    }
}

fn skip(operation: &str, reason: SkipReason) -> EditOutcome {
    log::debug!("{} skipped: {:?}", operation, reason);
    EditOutcome::Skipped(reason)
}
