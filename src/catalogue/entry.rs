use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an image (or a requested size) is wider than it is tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Classify a size. Square sizes count as portrait.
    pub fn of(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One image described by `catalogue.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogueEntry {
    /// File name relative to the images directory.
    pub file: String,

    #[serde(default)]
    pub desc: String,

    /// Attribution URL of the original photo.
    #[serde(default)]
    pub link: String,

    pub orientation: Orientation,

    /// Native width in pixels.
    pub width: u32,

    /// Native height in pixels.
    pub height: u32,
}

impl CatalogueEntry {
    /// True when the native size equals the requested size.
    pub fn matches_exactly(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}
