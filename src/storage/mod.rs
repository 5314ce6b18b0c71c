//! Object storage access for source and resized images
//!
//! The pipeline reads originals from one bucket and writes resized copies
//! to another through the [`ObjectStore`] trait, backed by any
//! S3-compatible service.

pub mod client;
pub mod mock;

pub use client::S3Store;
pub use mock::MockObjectStore;

use crate::Result;
use async_trait::async_trait;

/// Raw bytes of a stored object plus the content type recorded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fails with [`crate::Error::Fetch`].
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject>;

    /// Fails with [`crate::Error::Publish`].
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}
