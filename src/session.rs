//! Per-image snapshots of region collections.

use std::collections::BTreeMap;

use crate::drawer::RegionCollection;

/// Region collections keyed by image name.
///
/// Collections are moved in on [`SessionStore::save`] and handed back as
/// independent copies, so the collection being edited never aliases a stored
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    collections: BTreeMap<String, RegionCollection>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for `image_id`.
    pub fn save(&mut self, image_id: impl Into<String>, collection: RegionCollection) {
        let image_id = image_id.into();
        let updated = self.collections.insert(image_id.clone(), collection).is_some();
        if updated {
            log::debug!("Updated snapshot for '{}'", image_id);
        } else {
            log::info!(
                "Added snapshot for '{}' ({} images)",
                image_id,
                self.collections.len()
            );
        }
    }

    /// A copy of the stored snapshot, if there is one.
    pub fn restore_if_present(&self, image_id: &str) -> Option<RegionCollection> {
        self.collections.get(image_id).cloned()
    }

    pub fn get(&self, image_id: &str) -> Option<&RegionCollection> {
        self.collections.get(image_id)
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.collections.contains_key(image_id)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Snapshots in image-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionCollection)> {
        self.collections
            .iter()
            .map(|(name, collection)| (name.as_str(), collection))
    }

    /// Total number of regions across all snapshots.
    pub fn region_count(&self) -> usize {
        self.collections.values().map(RegionCollection::len).sum()
    }
}
