use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::DEFAULT_JPEG_QUALITY;
use crate::request::DEFAULT_MAX_DIMENSION;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on decode + resize + encode for a single request
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8482
}
fn default_render_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            render_timeout_secs: default_render_timeout(),
        }
    }
}

/// How the set of servable images is discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Select by metadata from `catalogue.json`
    #[default]
    Catalogue,
    /// Pick any image file in the directory at random
    Directory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    #[serde(default = "default_images_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub mode: ImageMode,

    /// Catalogue file name, relative to `dir`
    #[serde(default = "default_catalogue_file")]
    pub catalogue_file: String,

    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}
fn default_catalogue_file() -> String {
    "catalogue.json".to_string()
}
fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}
fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_images_dir(),
            mode: ImageMode::default(),
            catalogue_file: default_catalogue_file(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}
