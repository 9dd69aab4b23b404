//! Startup loading of the image set.
//!
//! Both loaders fail hard: a server with nothing to serve should not start.

use std::path::{Component, Path, PathBuf};

use image::ImageFormat;

use super::entry::{CatalogueEntry, Orientation};
use crate::error::{Error, Result};

/// Images described by a `catalogue.json` file.
///
/// Entries keep the order of the file; selection relies on it for
/// "first exact match wins".
#[derive(Debug, Clone)]
pub struct Catalogue {
    images_dir: PathBuf,
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// Read and validate `{images_dir}/{catalogue_file}`.
    pub fn load(images_dir: &Path, catalogue_file: &str) -> Result<Self> {
        let path = images_dir.join(catalogue_file);

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::catalogue_load(&path, format!("cannot read file: {e}")))?;

        let entries: Vec<CatalogueEntry> = serde_json::from_str(&content)
            .map_err(|e| Error::catalogue_load(&path, format!("cannot parse file: {e}")))?;

        Self::from_entries(images_dir.to_path_buf(), entries)
    }

    /// Build a catalogue from already-parsed entries.
    ///
    /// Every entry must name an existing file inside `images_dir`.
    pub fn from_entries(images_dir: PathBuf, entries: Vec<CatalogueEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::catalogue_load(&images_dir, "catalogue has no entries"));
        }

        for entry in &entries {
            if !is_contained(&entry.file) {
                return Err(Error::catalogue_load(
                    &images_dir,
                    format!("entry {:?} must be a path inside the images directory", entry.file),
                ));
            }

            let file_path = images_dir.join(&entry.file);
            if !file_path.is_file() {
                return Err(Error::catalogue_load(
                    &images_dir,
                    format!("entry {:?} does not exist", entry.file),
                ));
            }

            // Header only; the pixels are decoded per request.
            let (width, height) = image::image_dimensions(&file_path).map_err(|e| {
                Error::catalogue_load(
                    &images_dir,
                    format!("entry {:?} is not a readable image: {e}", entry.file),
                )
            })?;

            if !entry.matches_exactly(width, height) {
                tracing::warn!(
                    "Catalogue entry {} is listed as {}x{} but the file is {}x{}",
                    entry.file,
                    entry.width,
                    entry.height,
                    width,
                    height
                );
            }

            let implied = Orientation::of(entry.width, entry.height);
            if implied != entry.orientation {
                tracing::warn!(
                    "Catalogue entry {} is {}x{} but marked {}",
                    entry.file,
                    entry.width,
                    entry.height,
                    entry.orientation
                );
            }
        }

        tracing::info!(
            "Loaded catalogue with {} entries from {}",
            entries.len(),
            images_dir.display()
        );

        Ok(Self {
            images_dir,
            entries,
        })
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    /// Full path of an entry's file.
    pub fn path_of(&self, entry: &CatalogueEntry) -> PathBuf {
        self.images_dir.join(&entry.file)
    }

    /// Number of entries marked with the given orientation.
    pub fn count_by_orientation(&self, orientation: Orientation) -> usize {
        self.entries
            .iter()
            .filter(|e| e.orientation == orientation)
            .count()
    }
}

/// Image files found directly inside a directory, sorted by name.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    images_dir: PathBuf,
    files: Vec<String>,
}

impl DirectoryListing {
    /// List the raster images in `images_dir`.
    ///
    /// Hidden files, subdirectories and files whose extension is not an image
    /// format this build can decode (such as `catalogue.json`) are skipped.
    pub fn load(images_dir: &Path) -> Result<Self> {
        let read_dir = std::fs::read_dir(images_dir)
            .map_err(|e| Error::catalogue_load(images_dir, format!("cannot list directory: {e}")))?;

        let mut files = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| {
                Error::catalogue_load(images_dir, format!("cannot list directory: {e}"))
            })?;

            let path = dir_entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", path);
                continue;
            };

            // Known extension but no decoder compiled in counts as not an image.
            let decodable = ImageFormat::from_path(&path).is_ok_and(|f| f.reading_enabled());
            if name.starts_with('.') || !decodable {
                continue;
            }

            files.push(name.to_string());
        }

        if files.is_empty() {
            return Err(Error::catalogue_load(images_dir, "directory contains no images"));
        }

        files.sort();

        tracing::info!(
            "Found {} images in {}",
            files.len(),
            images_dir.display()
        );

        Ok(Self {
            images_dir: images_dir.to_path_buf(),
            files,
        })
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

/// Relative, with no `..`, root or prefix components.
fn is_contained(file: &str) -> bool {
    let path = Path::new(file);
    !file.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
