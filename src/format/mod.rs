//! Saving and loading region collections.
//!
//! All collections of a review session are written to a single YAML file in
//! the results directory (see [`polygon_file`]). The text of each record is
//! the collection's own [`describe`](crate::drawer::RegionCollection::describe)
//! output, so the drawer and the file agree on one serialized form.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polydraw::format::polygon_file;
//!
//! let (store, report) = polygon_file::load_or_empty(&path, &config.drawer);
//! // ... review ...
//! polygon_file::save(&path, &config.app_name, &store)?;
//! ```

mod error;
pub mod polygon_file;
mod report;
mod timestamp;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use report::{ExportResult, FormatWarning, ImportResult, WarningSeverity};
pub use timestamp::{current_timestamp, format_timestamp};

/// Wrap `s` in single quotes, doubling any quote inside it.
pub fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `s` as a YAML scalar: bare when YAML would read it back as the same
/// string, single-quoted otherwise.
pub fn yaml_scalar(s: &str) -> String {
    if is_plain_scalar(s) {
        s.to_string()
    } else {
        single_quoted(s)
    }
}

fn is_plain_scalar(s: &str) -> bool {
    let safe_chars = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'));
    // Rules out numbers, booleans and nulls like `17`, `true` or `null`
    safe_chars
        && matches!(
            serde_yaml::from_str::<serde_yaml::Value>(s),
            Ok(serde_yaml::Value::String(parsed)) if parsed == s
        )
}
