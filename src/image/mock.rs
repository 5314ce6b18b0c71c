use super::{scaled_dimensions, ImageService, ResizedImage};
use crate::models::{Dimensions, ImageFormat};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Pretends every source has `native` dimensions and echoes a marker payload.
#[derive(Clone)]
pub struct MockImageResizer {
    resize_count: Arc<Mutex<usize>>,
    native: Dimensions,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageResizer {
    pub fn new() -> Self {
        Self {
            resize_count: Arc::new(Mutex::new(0)),
            native: Dimensions::new(100, 100),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_native(mut self, native: Dimensions) -> Self {
        self.native = native;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_resize_count(&self) -> usize {
        *self.resize_count.lock().unwrap()
    }
}

impl Default for MockImageResizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageResizer {
    async fn resize(
        &self,
        _data: Vec<u8>,
        format: ImageFormat,
        bounds: Dimensions,
    ) -> Result<ResizedImage> {
        *self.resize_count.lock().unwrap() += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Resize("Mock failure".to_string()));
        }

        let output = scaled_dimensions(self.native, bounds)?;
        Ok(ResizedImage {
            data: format!("{}:{}", format, output).into_bytes(),
            native: self.native,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_resizer() {
        let resizer = MockImageResizer::new().with_native(Dimensions::new(800, 400));

        let result = resizer
            .resize(vec![], ImageFormat::Jpg, Dimensions::new(200, 200))
            .await
            .unwrap();

        assert_eq!(result.output, Dimensions::new(200, 100));
        assert_eq!(result.data, b"jpg:200x100");
        assert_eq!(resizer.get_resize_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_with_failure() {
        let resizer = MockImageResizer::new().with_failure(true);

        let result = resizer
            .resize(vec![], ImageFormat::Png, Dimensions::new(10, 10))
            .await;

        assert!(matches!(result, Err(Error::Resize(_))));
        assert_eq!(resizer.get_resize_count(), 1);
    }
}
