use super::{ImageService, ResizedImage};
use crate::models::{Dimensions, ImageFormat};
use crate::{Error, Result};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;

/// Upper bound on output pixels; upscaling past this is refused.
pub const MAX_OUTPUT_PIXELS: u64 = 100_000_000;

pub struct ImageResizer {
    filter: FilterType,
}

impl ImageResizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    fn resize_sync(
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Dimensions,
        filter: FilterType,
    ) -> Result<ResizedImage> {
        let img =
            image::load_from_memory_with_format(&data, format.codec()).map_err(Error::Decode)?;
        drop(data);

        let native = Dimensions::new(img.width(), img.height());
        let output = scaled_dimensions(native, bounds)?;

        let resized = img.resize_exact(output.width, output.height, filter);
        let data = encode(resized, format)?;

        Ok(ResizedImage {
            data,
            native,
            output,
        })
    }
}

impl Default for ImageResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scales `native` by `min(bounds.width / width, bounds.height / height)`.
///
/// Both axes use the same factor, so the aspect ratio is kept and the result
/// fits the bounds. Sources smaller than the bounds are scaled up. Fractional
/// sizes are rounded to the nearest pixel, with a floor of one pixel.
pub fn scaled_dimensions(native: Dimensions, bounds: Dimensions) -> Result<Dimensions> {
    if native.width == 0 || native.height == 0 {
        return Err(Error::Resize(format!("source image has no pixels ({})", native)));
    }

    let factor = f64::min(
        f64::from(bounds.width) / f64::from(native.width),
        f64::from(bounds.height) / f64::from(native.height),
    );

    let scale = |length: u32| -> Result<u32> {
        let scaled = (factor * f64::from(length)).round().max(1.0);
        if !scaled.is_finite() || scaled > f64::from(u32::MAX) {
            return Err(Error::Resize(format!(
                "scaled length {} is out of range",
                scaled
            )));
        }
        Ok(scaled as u32)
    };

    let output = Dimensions::new(scale(native.width)?, scale(native.height)?);

    let pixels = u64::from(output.width) * u64::from(output.height);
    if pixels > MAX_OUTPUT_PIXELS {
        return Err(Error::Resize(format!(
            "output {} has {} pixels, limit is {}",
            output, pixels, MAX_OUTPUT_PIXELS
        )));
    }

    Ok(output)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let image = match format {
        ImageFormat::Jpg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Png => image,
    };

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format.codec())
        .map_err(Error::Encode)?;
    Ok(bytes)
}

#[async_trait]
impl ImageService for ImageResizer {
    async fn resize(
        &self,
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Dimensions,
    ) -> Result<ResizedImage> {
        let filter = self.filter;
        tokio::task::spawn_blocking(move || Self::resize_sync(data, format, bounds, filter))
            .await
            .map_err(|e| Error::Invariant(format!("Image processing task join error: {}", e)))?
    }
}
