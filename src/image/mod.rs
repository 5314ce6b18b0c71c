//! Image resizing
//!
//! Decodes a source image, scales it uniformly to fit a bounding box and
//! re-encodes it in its original format.

pub mod mock;
pub mod processor;

pub use mock::MockImageResizer;
pub use processor::{scaled_dimensions, ImageResizer};

use crate::models::{Dimensions, ImageFormat};
use crate::Result;
use async_trait::async_trait;

pub struct ResizedImage {
    pub data: Vec<u8>,
    pub native: Dimensions,
    pub output: Dimensions,
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn resize(
        &self,
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Dimensions,
    ) -> Result<ResizedImage>;
}
