//! Mapping a requested size to one image on disk.

use std::path::PathBuf;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::catalogue::{Catalogue, CatalogueEntry, DirectoryListing, Orientation};
use crate::config::{ImageMode, ImagesConfig};
use crate::error::{Error, Result};
use crate::request::ImageRequest;

/// The image chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// File to read, already joined with the images directory.
    pub path: PathBuf,
    /// Attribution URL, when the source knows one.
    pub link: Option<String>,
}

/// A read-only set of images that can answer size requests.
///
/// Implementations are shared between request tasks without locking.
pub trait ImageSource: Send + Sync {
    /// Pick an image for `request`, using `rng` for any random choice.
    fn select(&self, request: ImageRequest, rng: &mut dyn RngCore) -> Result<Selection>;

    /// Number of images available.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name for logs.
    fn kind(&self) -> &'static str;
}

/// Choose a catalogue entry for the request.
///
/// The first entry whose native size equals the request wins. Otherwise an
/// entry with the request's orientation is picked uniformly at random.
pub fn select_entry<'a>(
    entries: &'a [CatalogueEntry],
    request: ImageRequest,
    rng: &mut dyn RngCore,
) -> Result<&'a CatalogueEntry> {
    if let Some(exact) = entries
        .iter()
        .find(|e| e.matches_exactly(request.width, request.height))
    {
        return Ok(exact);
    }

    // No aspect-ratio matching: fall straight through to orientation.
    let orientation = request.orientation();
    let candidates: Vec<&CatalogueEntry> = entries
        .iter()
        .filter(|e| e.orientation == orientation)
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(Error::NoCandidateImage(orientation))
}

impl ImageSource for Catalogue {
    fn select(&self, request: ImageRequest, rng: &mut dyn RngCore) -> Result<Selection> {
        let entry = select_entry(self.entries(), request, rng)?;

        tracing::debug!(
            "Selected {} ({}x{}) for {}x{}",
            entry.file,
            entry.width,
            entry.height,
            request.width,
            request.height
        );

        Ok(Selection {
            path: self.path_of(entry),
            link: (!entry.link.is_empty()).then(|| entry.link.clone()),
        })
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn kind(&self) -> &'static str {
        "catalogue"
    }
}

impl ImageSource for DirectoryListing {
    fn select(&self, request: ImageRequest, rng: &mut dyn RngCore) -> Result<Selection> {
        let file = self
            .files()
            .choose(rng)
            .ok_or(Error::NoCandidateImage(request.orientation()))?;

        tracing::debug!(
            "Selected {} for {}x{}",
            file,
            request.width,
            request.height
        );

        Ok(Selection {
            path: self.images_dir().join(file),
            link: None,
        })
    }

    fn len(&self) -> usize {
        self.files().len()
    }

    fn kind(&self) -> &'static str {
        "directory"
    }
}

/// Load the image source configured by `config`.
pub fn load_source(config: &ImagesConfig) -> Result<Arc<dyn ImageSource>> {
    let source: Arc<dyn ImageSource> = match config.mode {
        ImageMode::Catalogue => Arc::new(Catalogue::load(&config.dir, &config.catalogue_file)?),
        ImageMode::Directory => Arc::new(DirectoryListing::load(&config.dir)?),
    };

    if source.is_empty() {
        return Err(Error::catalogue_load(&config.dir, "no images to serve"));
    }

    Ok(source)
}

/// Per-orientation entry counts, for reporting.
pub fn orientation_summary(catalogue: &Catalogue) -> [(Orientation, usize); 2] {
    [
        (
            Orientation::Landscape,
            catalogue.count_by_orientation(Orientation::Landscape),
        ),
        (
            Orientation::Portrait,
            catalogue.count_by_orientation(Orientation::Portrait),
        ),
    ]
}
