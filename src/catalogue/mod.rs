//! The set of images placepug can serve.
//!
//! A [`Catalogue`] is read from `catalogue.json` and carries per-image
//! metadata; a [`DirectoryListing`] is just the image files found in the
//! images directory. Both are loaded once at startup and never mutated.

mod entry;
mod store;

pub use entry::{CatalogueEntry, Orientation};
pub use store::{Catalogue, DirectoryListing};
