//! polydraw - fixed-vertex polygon annotation for image folders
//!
//! Each image gets a [`drawer::RegionCollection`] of named polygons with
//! normalized vertices. A [`review::ReviewSession`] walks an image list,
//! keeping one collection live and the rest in a [`session::SessionStore`],
//! which [`format::polygon_file`] saves to and restores from a YAML file.

pub mod config;
pub mod constants;
pub mod drawer;
pub mod format;
pub mod geometry;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod preview;
pub mod project;
pub mod review;
pub mod session;
pub mod surface;

pub use config::AppConfig;
pub use drawer::{DrawerConfig, EditOutcome, Readiness, RegionCollection, RenderStyle};
pub use geometry::{ImageSize, NormPoint, PixelPoint};
pub use review::{Flow, ReviewImage, ReviewSession};
pub use session::SessionStore;
