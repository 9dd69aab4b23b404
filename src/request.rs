//! Parsing and validation of the requested image size.

use crate::catalogue::Orientation;
use crate::error::{Error, Result};

/// Default upper bound for either dimension.
pub const DEFAULT_MAX_DIMENSION: u32 = 2000;

/// A validated width and height, each in `1..=max_dimension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRequest {
    pub width: u32,
    pub height: u32,
}

impl ImageRequest {
    /// Parse raw path segments.
    ///
    /// A missing or empty segment is [`Error::MissingParameter`]; anything that
    /// is not plain ASCII digits, overflows, is zero or exceeds
    /// `max_dimension` is [`Error::InvalidParameter`].
    pub fn parse(width: Option<&str>, height: Option<&str>, max_dimension: u32) -> Result<Self> {
        let width = width.filter(|w| !w.is_empty());
        let height = height.filter(|h| !h.is_empty());

        let width = width.ok_or(Error::MissingParameter("width"))?;
        let height = height.ok_or(Error::MissingParameter("height"))?;

        Ok(Self {
            width: parse_dimension("width", width, max_dimension)?,
            height: parse_dimension("height", height, max_dimension)?,
        })
    }

    /// Landscape when wider than tall, otherwise portrait.
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }
}

fn parse_dimension(name: &'static str, value: &str, max: u32) -> Result<u32> {
    let invalid = || Error::InvalidParameter {
        name,
        value: value.to_string(),
        max,
    };

    // u32::from_str would also accept a leading '+'
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match value.parse::<u32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(invalid()),
    }
}
