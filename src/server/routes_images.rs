//! Placeholder image routes.
//!
//! `GET /{width}/{height}` picks an image, resizes it and answers with JPEG
//! bytes. Every failure ends the request with a plaintext 400 or 500.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::AppContext;
use crate::error::{Error, Result};
use crate::render;
use crate::request::ImageRequest;

/// Attribution header set when the chosen image has a source link.
pub const ORIGINAL_LINK_HEADER: HeaderName = HeaderName::from_static("x-original-link");

/// Create image-related routes.
pub fn image_routes() -> Router<AppContext> {
    Router::new()
        .route("/:width", get(missing_height))
        .route("/:width/:height", get(serve_image))
}

/// Serve a placeholder image resized to the requested size.
async fn serve_image(
    State(ctx): State<AppContext>,
    Path((width, height)): Path<(String, String)>,
) -> Result<Response> {
    let images = &ctx.config.images;
    let request = ImageRequest::parse(Some(&width), Some(&height), images.max_dimension)?;

    tracing::debug!("Retrieving image of {}x{}", request.width, request.height);

    let selection = ctx.source.select(request, &mut rand::thread_rng())?;

    let data = tokio::fs::read(&selection.path)
        .await
        .map_err(|source| Error::ImageRead {
            path: selection.path.clone(),
            source,
        })?;

    let body = render::render_blocking(
        data,
        request.width,
        request.height,
        images.jpeg_quality,
        Duration::from_secs(ctx.config.server.render_timeout_secs),
    )
    .await?;

    let mut response = ([(header::CONTENT_TYPE, "image/jpeg")], body).into_response();

    if let Some(link) = selection.link {
        match HeaderValue::from_str(&link) {
            Ok(value) => {
                response.headers_mut().insert(ORIGINAL_LINK_HEADER, value);
            }
            Err(_) => tracing::warn!("Link {:?} is not a valid header value", link),
        }
    }

    Ok(response)
}

/// `GET /{width}` without a height.
async fn missing_height(Path(_width): Path<String>) -> Error {
    Error::MissingParameter("height")
}
