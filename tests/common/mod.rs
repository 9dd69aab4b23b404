//! Shared test harness for integration tests.
//!
//! [`TestHarness`] writes generated JPEG fixtures and an optional
//! `catalogue.json` into a temporary images directory, then builds the full
//! router around them. [`TestHarness::serve`] additionally binds Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;
use tower::ServiceExt;

use placepug::catalogue::{Catalogue, CatalogueEntry, DirectoryListing, Orientation};
use placepug::config::{Config, ImageMode};
use placepug::selector::ImageSource;
use placepug::server::{create_router, AppContext};

/// A fixture image: file name, native size and attribution link.
pub struct Fixture {
    pub file: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Fixture {
    pub const fn new(file: &'static str, width: u32, height: u32) -> Self {
        Self {
            file,
            width,
            height,
        }
    }

    pub fn link(&self) -> String {
        format!("https://example.com/pugs/{}", self.file)
    }

    fn entry(&self) -> CatalogueEntry {
        CatalogueEntry {
            file: self.file.to_string(),
            desc: format!("Fixture {}", self.file),
            link: self.link(),
            orientation: Orientation::of(self.width, self.height),
            width: self.width,
            height: self.height,
        }
    }
}

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// temporary images directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Catalogue mode with one entry per fixture, in the given order.
    pub fn catalogue(fixtures: &[Fixture]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_fixtures(dir.path(), fixtures);

        let entries: Vec<CatalogueEntry> = fixtures.iter().map(Fixture::entry).collect();
        std::fs::write(
            dir.path().join("catalogue.json"),
            serde_json::to_string_pretty(&entries).expect("failed to serialize catalogue"),
        )
        .expect("failed to write catalogue");

        let catalogue =
            Catalogue::load(dir.path(), "catalogue.json").expect("failed to load catalogue");

        Self::build(dir, ImageMode::Catalogue, Arc::new(catalogue))
    }

    /// Directory mode over the fixtures.
    pub fn directory(fixtures: &[Fixture]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_fixtures(dir.path(), fixtures);

        let listing = DirectoryListing::load(dir.path()).expect("failed to list images");

        Self::build(dir, ImageMode::Directory, Arc::new(listing))
    }

    fn build(dir: TempDir, mode: ImageMode, source: Arc<dyn ImageSource>) -> Self {
        let mut config = Config::default();
        config.images.dir = dir.path().to_path_buf();
        config.images.mode = mode;

        Self {
            ctx: AppContext::new(config, source),
            dir,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Send a GET through the router without a socket.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Start an Axum server on a random port and return the bound address.
    pub async fn serve(&self) -> SocketAddr {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

/// Write a solid-colour JPEG of the fixture's size for each fixture.
pub fn write_fixtures(dir: &Path, fixtures: &[Fixture]) {
    for (i, fixture) in fixtures.iter().enumerate() {
        let shade = (i as u8).wrapping_mul(40);
        let img = RgbImage::from_pixel(fixture.width, fixture.height, Rgb([shade, 90, 160]));
        img.save_with_format(dir.join(fixture.file), ImageFormat::Jpeg)
            .expect("failed to write fixture");
    }
}

/// Collect a response body into bytes.
pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Collect a response body into a string.
pub async fn body_string(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).unwrap()
}

/// Decoded pixel dimensions of a JPEG body.
pub fn jpeg_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .expect("response is not a JPEG");
    (img.width(), img.height())
}
