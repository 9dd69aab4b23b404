//! Decode, resize and JPEG-encode a source image.
//!
//! Everything here is CPU bound. [`render_blocking`] moves the work onto the
//! blocking thread pool and bounds it with a timeout.

use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Bicubic resampling.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decode any supported raster format.
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(data).map_err(Error::Decode)
}

/// Scale to exactly `width` x `height`. The aspect ratio is not preserved.
pub fn resize(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, RESIZE_FILTER)
}

/// Encode as baseline JPEG. Any alpha channel is dropped.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();

    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(Error::Encode)?;

    Ok(buf)
}

/// Decode `data`, resize it and encode the result as JPEG.
pub fn render(data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let img = decode(data)?;
    let resized = resize(&img, width, height);
    encode_jpeg(&resized, quality)
}

/// Run [`render`] on the blocking pool, failing after `timeout`.
pub async fn render_blocking(
    data: Vec<u8>,
    width: u32,
    height: u32,
    quality: u8,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let task = tokio::task::spawn_blocking(move || render(&data, width, height, quality));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(Error::Internal(format!("render task failed: {e}"))),
        // The blocking thread runs to completion; its output is discarded.
        Err(_) => Err(Error::RenderTimeout(timeout.as_secs())),
    }
}
