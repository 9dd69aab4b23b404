//! placepug - placeholder images at any size
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod render;
pub mod request;
pub mod selector;
pub mod server;

pub use error::{Error, Result};
