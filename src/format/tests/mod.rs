//! Tests for the polygon data file.

mod malformed_tests;

use std::path::PathBuf;

use crate::drawer::{DrawerConfig, RegionCollection};
use crate::geometry::{ImageSize, NormPoint};

const EPSILON: f32 = 0.0005;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn config() -> DrawerConfig {
    DrawerConfig::default().with_seed(11)
}

fn collection(size: ImageSize, regions: &[(&str, Vec<NormPoint>)]) -> RegionCollection {
    let mut collection = RegionCollection::new(config());
    collection.set_image_size(size);
    for (name, vertices) in regions {
        collection.insert_region(name, vertices.clone());
    }
    collection
}

/// A fresh directory under the system temp dir.
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("polydraw_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
