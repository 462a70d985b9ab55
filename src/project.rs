//! Image folders and the results directory.

use std::path::{Path, PathBuf};

use crate::geometry::ImageSize;

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"];

/// Check if a path has a supported image extension
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Errors from scanning folders and reading images.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No image files found in {folder:?} or its subfolders")]
    NoImages { folder: PathBuf },

    #[error("Failed to read image: {0}")]
    Image(#[from] image::ImageError),
}

/// One image found in the source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Path relative to the source folder, `/`-separated; the key used in the
    /// data file.
    pub name: String,
    /// Full path on disk
    pub path: PathBuf,
}

impl ImageEntry {
    /// Read the pixel size from the file header without decoding the image.
    pub fn read_size(&self) -> Result<ImageSize, ProjectError> {
        let (width, height) = image::image_dimensions(&self.path)?;
        Ok(ImageSize::new(width, height))
    }
}

/// The images of a source folder, sorted by path.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    folder: PathBuf,
    entries: Vec<ImageEntry>,
}

impl ImageCatalog {
    /// Discover image files in a folder recursively.
    pub fn from_folder_recursive(folder: &Path) -> Result<Self, ProjectError> {
        let mut paths: Vec<PathBuf> = Vec::new();
        Self::scan_folder_recursive(folder, &mut paths)?;

        if paths.is_empty() {
            return Err(ProjectError::NoImages {
                folder: folder.to_path_buf(),
            });
        }

        // Sort by full path for consistent ordering
        paths.sort();

        let entries = paths
            .into_iter()
            .map(|path| ImageEntry {
                name: relative_name(folder, &path),
                path,
            })
            .collect::<Vec<_>>();

        log::info!(
            "Recursively scanned folder {:?}: found {} images",
            folder,
            entries.len()
        );

        Ok(Self {
            folder: folder.to_path_buf(),
            entries,
        })
    }

    fn scan_folder_recursive(folder: &Path, images: &mut Vec<PathBuf>) -> Result<(), ProjectError> {
        for entry in std::fs::read_dir(folder)?.filter_map(|e| e.ok()) {
            let path = entry.path();

            if path.is_file() && is_image_file(&path) {
                images.push(path);
            } else if path.is_dir() {
                if let Err(e) = Self::scan_folder_recursive(&path, images) {
                    log::warn!("Failed to scan subdirectory {:?}: {}", path, e);
                }
            }
        }
        Ok(())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn relative_name(folder: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(folder).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Create the results directory if it does not exist yet.
pub fn ensure_results_dir(dir: &Path) -> Result<(), ProjectError> {
    if !dir.exists() {
        log::warn!("Results dir {:?} not found, creating it", dir);
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "polydraw_project_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_recursive_scan_sorted_with_relative_names() {
        let dir = temp_dir("scan");
        std::fs::create_dir_all(dir.join("b")).unwrap();
        RgbImage::new(4, 3).save(dir.join("b").join("two.png")).unwrap();
        RgbImage::new(8, 6).save(dir.join("a.png")).unwrap();
        RgbImage::new(2, 2).save(dir.join("UPPER.PNG")).unwrap();
        std::fs::write(dir.join("notes.txt"), "not an image").unwrap();

        let catalog = ImageCatalog::from_folder_recursive(&dir).unwrap();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["UPPER.PNG", "a.png", "b/two.png"]);
        assert_eq!(catalog.len(), 3);

        let two = &catalog.entries()[2];
        assert_eq!(two.read_size().unwrap(), ImageSize::new(4, 3));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_folder_is_an_error() {
        let dir = temp_dir("empty");
        std::fs::write(dir.join("readme.md"), "nothing here").unwrap();

        let err = ImageCatalog::from_folder_recursive(&dir).unwrap_err();
        assert!(matches!(err, ProjectError::NoImages { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_folder_is_io_error() {
        let dir = std::env::temp_dir().join("polydraw_project_does_not_exist");
        let err = ImageCatalog::from_folder_recursive(&dir).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn test_ensure_results_dir_creates_nested() {
        let dir = temp_dir("results");
        let results = dir.join("out").join("run1");
        ensure_results_dir(&results).unwrap();
        assert!(results.is_dir());
        // Second call is a no-op
        ensure_results_dir(&results).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
