//! The `polygon_drawer.yaml` data file.
//!
//! The file is a YAML document with one flow-mapping record per image:
//!
//! ```text
//! appname: polydraw
//!
//! datetime: 2024-02-29T12:34:56Z
//!
//! polygons:
//!  - { name: street/0001.png, w: 640, h: 480, ids: ['4217'], vertices: [[[0.125, 0.125], [0.200, 0.100]]] }
//! ```
//!
//! Everything after `name` is [`RegionCollection::describe`] verbatim, so
//! vertices survive a save/load cycle to three decimals only.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use super::error::FormatError;
use super::report::{ExportResult, FormatWarning, ImportResult};
use super::timestamp::current_timestamp;
use super::yaml_scalar;
use crate::drawer::{DrawerConfig, RegionCollection};
use crate::geometry::{ImageSize, NormPoint};
use crate::session::SessionStore;

/// Render the whole document for `store`.
pub fn write_document(app_name: &str, datetime: &str, store: &SessionStore) -> String {
    let mut out = String::new();
    out.push_str(&format!("appname: {}\n", yaml_scalar(app_name)));
    out.push_str(&format!("\ndatetime: {}\n", datetime));
    out.push_str("\npolygons:\n");
    for (name, collection) in store.iter() {
        out.push_str(&format!(
            " - {{ name: {}, {} }}\n",
            yaml_scalar(name),
            collection.describe()
        ));
    }
    out
}

/// Write `store` to `path`. Nothing is written when the store is empty.
pub fn save(
    path: &Path,
    app_name: &str,
    store: &SessionStore,
) -> Result<ExportResult, FormatError> {
    let mut result = ExportResult::new();
    if store.is_empty() {
        log::info!("No polygon data to save");
        return Ok(result);
    }

    let document = write_document(app_name, &current_timestamp(), store);
    fs::write(path, document)?;

    result.images_exported = store.len();
    result.regions_exported = store.region_count();
    result.files_created.push(path.to_path_buf());
    log::info!(
        "Saved {} images with {} regions to {:?}",
        result.images_exported,
        result.regions_exported,
        path
    );
    Ok(result)
}

/// Parse a document into a store.
///
/// Only a broken document is an error. Broken records are skipped and
/// reported in the returned [`ImportResult`].
pub fn parse_document(
    text: &str,
    config: &DrawerConfig,
) -> Result<(SessionStore, ImportResult), FormatError> {
    let mut store = SessionStore::new();
    let mut result = ImportResult::new();

    let root: Value = serde_yaml::from_str(text)?;
    let records = match &root {
        Value::Null => return Ok((store, result)),
        Value::Mapping(map) => match map.get("polygons") {
            None | Some(Value::Null) => return Ok((store, result)),
            Some(Value::Sequence(records)) => records,
            Some(_) => return Err(FormatError::invalid_format("'polygons' is not a list")),
        },
        _ => return Err(FormatError::invalid_format("document is not a mapping")),
    };

    for (index, record) in records.iter().enumerate() {
        match parse_record(record, config, &mut result) {
            Ok((name, collection)) => {
                if store.contains(&name) {
                    log::warn!("Duplicate record for '{}', keeping the first", name);
                    result.add_warning(
                        FormatWarning::error("duplicate record ignored").with_image(name),
                    );
                    continue;
                }
                result.images_restored += 1;
                result.regions_restored += collection.len();
                log::debug!(
                    "  {}: {} x {}, {} regions",
                    name,
                    collection.image_size().width,
                    collection.image_size().height,
                    collection.len()
                );
                store.save(name, collection);
            }
            Err(err) => {
                log::warn!("Skipping polygon record {}: {}", index, err);
                let mut warning = FormatWarning::error(err.to_string());
                if let Some(name) = record_name(record) {
                    warning = warning.with_image(name);
                }
                result.add_warning(warning);
            }
        }
    }

    Ok((store, result))
}

/// Read and parse the file at `path`.
pub fn load(
    path: &Path,
    config: &DrawerConfig,
) -> Result<(SessionStore, ImportResult), FormatError> {
    let text = fs::read_to_string(path)?;
    let loaded = parse_document(&text, config)?;
    log::info!(
        "Loaded {} images with {} regions from {:?}",
        loaded.1.images_restored,
        loaded.1.regions_restored,
        path
    );
    Ok(loaded)
}

/// Like [`load`], but a missing or unreadable file yields an empty store.
pub fn load_or_empty(path: &Path, config: &DrawerConfig) -> (SessionStore, ImportResult) {
    if !path.exists() {
        log::warn!("Polygon data file is not available: {:?}", path);
        return (SessionStore::new(), ImportResult::new());
    }
    match load(path, config) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::warn!("Failed to load polygon data from {:?}: {}", path, err);
            (SessionStore::new(), ImportResult::new())
        }
    }
}

fn parse_record(
    record: &Value,
    config: &DrawerConfig,
    result: &mut ImportResult,
) -> Result<(String, RegionCollection), FormatError> {
    let Value::Mapping(map) = record else {
        return Err(FormatError::invalid_format("record is not a mapping"));
    };

    let name = scalar_text(field(map, "name")?)
        .ok_or_else(|| FormatError::invalid_format("'name' is not a scalar"))?;
    let width = dimension(map, "w")?;
    let height = dimension(map, "h")?;

    let Value::Sequence(ids) = field(map, "ids")? else {
        return Err(FormatError::invalid_format("'ids' is not a list"));
    };
    let Value::Sequence(polygons) = field(map, "vertices")? else {
        return Err(FormatError::invalid_format("'vertices' is not a list"));
    };
    if ids.len() != polygons.len() {
        return Err(FormatError::LengthMismatch {
            image: name,
            ids: ids.len(),
            vertices: polygons.len(),
        });
    }

    let mut regions = Vec::with_capacity(ids.len());
    for (id, polygon) in ids.iter().zip(polygons) {
        let id = scalar_text(id).ok_or_else(|| FormatError::invalid_format("id is not a scalar"))?;
        regions.push((id, polygon_points(polygon)?));
    }

    let mut collection = RegionCollection::new(config.for_image(&name));
    collection.set_image_size(ImageSize::new(width, height));
    for (id, points) in regions {
        let outcome = collection.insert_region(&id, points);
        if !outcome.is_applied() {
            log::warn!("Skipping region '{}' of '{}': {:?}", id, name, outcome);
            result.add_warning(
                FormatWarning::warning(format!("region '{}' skipped: {:?}", id, outcome))
                    .with_image(name.clone()),
            );
        }
    }
    Ok((name, collection))
}

fn field<'a>(map: &'a Mapping, key: &str) -> Result<&'a Value, FormatError> {
    map.get(key).ok_or_else(|| FormatError::missing_field(key))
}

fn dimension(map: &Mapping, key: &str) -> Result<u32, FormatError> {
    field(map, key)?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| FormatError::invalid_format(format!("'{}' is not a pixel size", key)))
}

fn polygon_points(polygon: &Value) -> Result<Vec<NormPoint>, FormatError> {
    let Value::Sequence(points) = polygon else {
        return Err(FormatError::invalid_format("polygon is not a list"));
    };
    points
        .iter()
        .map(|point| match point.as_sequence().map(Vec::as_slice) {
            Some([x, y]) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Ok(NormPoint::new(x as f32, y as f32)),
                _ => Err(FormatError::invalid_format("vertex is not numeric")),
            },
            _ => Err(FormatError::invalid_format("vertex is not an [x, y] pair")),
        })
        .collect()
}

/// Textual form of a scalar. Unquoted names like `17` come back as numbers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn record_name(record: &Value) -> Option<String> {
    record.get("name").and_then(scalar_text)
}
