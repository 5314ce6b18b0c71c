//! Request interpretation
//!
//! Turns a trigger payload into a [`ResizePlan`] without touching storage.

use crate::models::{Dimensions, ImageFormat, ResizeRequest};
use crate::{Error, Result};

/// Everything the later stages need, derived from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizePlan {
    pub source_key: String,
    pub destination_key: String,
    pub format: ImageFormat,
    pub bounds: Dimensions,
}

/// Validates the request and derives the plan.
///
/// The format is checked before the size so that a bad key is reported as
/// such even when the size is also malformed.
pub fn interpret(request: &ResizeRequest) -> Result<ResizePlan> {
    let format = infer_format(&request.image)?;
    let bounds = parse_size(&request.size)?;

    Ok(ResizePlan {
        source_key: request.image.clone(),
        destination_key: destination_key(&request.size, &request.image),
        format,
        bounds,
    })
}

/// Destination key: `{size}/{source_key}`. No existence check is made.
pub fn destination_key(size: &str, source_key: &str) -> String {
    format!("{}/{}", size, source_key)
}

/// Reads the format from the text after the last `.` of the key.
pub fn infer_format(key: &str) -> Result<ImageFormat> {
    let (_, ext) = key
        .rsplit_once('.')
        .ok_or_else(|| Error::Format(key.to_string()))?;

    ImageFormat::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
}

/// Parses `WIDTHxHEIGHT` into positive bounds.
pub fn parse_size(spec: &str) -> Result<Dimensions> {
    let invalid = |reason: &str| Error::InvalidSizeSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let (width, height) = spec
        .split_once('x')
        .ok_or_else(|| invalid("expected WIDTHxHEIGHT"))?;

    let parse_axis = |value: &str, axis: &str| -> Result<u32> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(&format!("{} '{}' is not a positive integer", axis, value)));
        }
        match value.parse::<u32>() {
            Ok(0) => Err(invalid(&format!("{} must be positive", axis))),
            Ok(v) => Ok(v),
            Err(e) => Err(invalid(&format!("{} '{}' is not a number: {}", axis, value, e))),
        }
    };

    Ok(Dimensions::new(
        parse_axis(width, "width")?,
        parse_axis(height, "height")?,
    ))
}
