//! Review session: walking an image list with one editable collection.
//!
//! Only the collection of the image on screen is live. Switching images
//! stores it in the [`SessionStore`] and restores (or creates) the next one,
//! so an in-progress drag never carries over to another image.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::drawer::{DrawerConfig, PointerEvent, RegionCollection};
use crate::geometry::ImageSize;
use crate::message::Message;
use crate::session::SessionStore;

/// An image of the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewImage {
    /// Key under which its collection is stored
    pub name: String,
    pub size: ImageSize,
}

impl ReviewImage {
    pub fn new(name: impl Into<String>, size: ImageSize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Whether the review loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ReviewSession {
    images: Vec<ReviewImage>,
    index: usize,
    current: RegionCollection,
    store: SessionStore,
    config: DrawerConfig,
    /// Source of generated region ids
    rng: Pcg32,
}

impl ReviewSession {
    /// Start at the first image. Returns None for an empty image list.
    pub fn new(
        images: Vec<ReviewImage>,
        store: SessionStore,
        config: DrawerConfig,
    ) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let mut session = Self {
            images,
            index: 0,
            current: RegionCollection::new(config.clone()),
            store,
            config,
            rng,
        };
        session.open(0);
        Some(session)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn images(&self) -> &[ReviewImage] {
        &self.images
    }

    pub fn current_image(&self) -> &ReviewImage {
        &self.images[self.index]
    }

    /// The collection being edited.
    pub fn collection(&self) -> &RegionCollection {
        &self.current
    }

    /// Snapshots of the images already left.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn handle(&mut self, message: Message) -> Flow {
        match message {
            Message::PointerDown(point) => {
                self.current.handle_pointer(PointerEvent::Down(point));
            }
            Message::PointerMove(point) => {
                self.current.handle_pointer(PointerEvent::Move(point));
            }
            Message::PointerUp => {
                self.current.handle_pointer(PointerEvent::Up);
            }
            Message::AddRegion => {
                let id = self.random_id();
                self.current.add_region(&id);
            }
            Message::DeleteLastRegion => {
                self.current.delete_last_region();
            }
            Message::DeleteRegion(id) => {
                self.current.delete_region(&id);
            }
            Message::RenameRegion { id, name } => {
                self.current.rename_region(&id, &name);
            }
            Message::SelectRegion(id) => {
                self.current.set_active_region(&id);
            }
            Message::FirstImage => {
                log::info!("Action: go to the first image");
                self.switch_to(0);
            }
            Message::PrevImage => {
                log::info!("Action: go back to the previous image");
                let n = self.images.len();
                self.switch_to((self.index + n - 1) % n);
            }
            Message::NextImage => {
                log::info!("Action: proceed to the next image");
                self.switch_to((self.index + 1) % self.images.len());
            }
            Message::Quit => {
                log::info!("Action: quitting");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Store the current collection and hand back every snapshot.
    pub fn finish(mut self) -> SessionStore {
        self.leave();
        self.store
    }

    fn switch_to(&mut self, index: usize) {
        self.leave();
        self.open(index);
    }

    fn open(&mut self, index: usize) {
        self.index = index;
        let image = &self.images[index];
        log::info!("Index {}: {}", index, image.name);

        let mut collection = match self.store.restore_if_present(&image.name) {
            Some(collection) => {
                log::info!("Found previous polygons for '{}'", image.name);
                collection
            }
            None => {
                log::debug!("Created a new collection for '{}'", image.name);
                RegionCollection::new(self.config.for_image(&image.name))
            }
        };
        collection.set_image_size(image.size);
        self.current = collection;
    }

    fn leave(&mut self) {
        self.current.release_selection();
        let name = self.images[self.index].name.clone();
        if self.store.contains(&name) || !self.current.is_empty() {
            let collection =
                std::mem::replace(&mut self.current, RegionCollection::new(self.config.clone()));
            self.store.save(name, collection);
        }
    }

    /// Four digits: two zero-padded numbers below 100.
    fn random_id(&mut self) -> String {
        format!(
            "{:02}{:02}",
            self.rng.random_range(0..100u32),
            self.rng.random_range(0..100u32)
        )
    }
}
