//! Data models for polydraw.

mod region;

pub use region::{Region, RegionId};
