//! Unified error type for placepug.
//!
//! Every per-request failure is funnelled into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via [`Error::http_status`]
//! and a short plaintext body via [`Error::public_message`].

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::catalogue::Orientation;

/// Unified error type covering all failure modes in placepug.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required path parameter was not supplied.
    #[error("{0} not present")]
    MissingParameter(&'static str),

    /// A path parameter was not an integer or was out of range.
    #[error("invalid {name} {value:?}: must be between 1 and {max}")]
    InvalidParameter {
        /// Parameter name ("width" or "height").
        name: &'static str,
        /// The raw value from the URL.
        value: String,
        /// Largest accepted value.
        max: u32,
    },

    /// The image source could not be loaded at startup.
    #[error("failed to load images from {}: {reason}", path.display())]
    CatalogueLoad {
        /// The catalogue file or images directory.
        path: PathBuf,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// No image satisfies the request.
    #[error("no {0} image available")]
    NoCandidateImage(Orientation),

    /// The selected image could not be read from disk.
    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        /// Path of the selected image.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The selected image is not a recognisable raster image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The resized image could not be encoded as JPEG.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// Decoding, resizing and encoding did not finish in time.
    #[error("rendering exceeded {0} seconds")]
    RenderTimeout(u64),

    /// Catch-all for unexpected internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) | Error::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Error::CatalogueLoad { .. }
            | Error::NoCandidateImage(_)
            | Error::ImageRead { .. }
            | Error::Decode(_)
            | Error::Encode(_)
            | Error::RenderTimeout(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message safe to show to clients. Never includes filesystem paths.
    pub fn public_message(&self) -> String {
        match self {
            Error::MissingParameter(name) => format!("err: {name} not present"),
            Error::InvalidParameter { name, max, .. } => {
                format!("err: {name} must be between 1 and {max}")
            }
            Error::CatalogueLoad { .. } => "err: image catalogue unavailable".into(),
            Error::NoCandidateImage(_) => "err: no suitable image found".into(),
            Error::ImageRead { .. } => "err: failed to open image".into(),
            Error::Decode(_) => "err: failed to decode image".into(),
            Error::Encode(_) => "err: failed to encode response".into(),
            Error::RenderTimeout(_) => "err: image took too long to render".into(),
            Error::Internal(_) => "err: internal server error".into(),
        }
    }

    /// Convenience constructor for [`Error::CatalogueLoad`].
    pub fn catalogue_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::CatalogueLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Internal server error");
        } else {
            tracing::debug!(status = %status, error = %self, "Rejected request");
        }

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
