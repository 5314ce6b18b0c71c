use super::{ObjectStore, StoredObject};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Objects = HashMap<(String, String), StoredObject>;

#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<Objects>>,
    get_count: Arc<Mutex<usize>>,
    put_count: Arc<Mutex<usize>>,
    fail_puts: Arc<Mutex<bool>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(
        self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Self {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub fn with_put_failure(self, should_fail: bool) -> Self {
        *self.fail_puts.lock().unwrap() = should_fail;
        self
    }

    pub fn get_count(&self) -> usize {
        *self.get_count.lock().unwrap()
    }

    pub fn put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        *self.get_count.lock().unwrap() += 1;

        self.object(bucket, key).ok_or_else(|| Error::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: "NoSuchKey: the specified key does not exist".to_string(),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        *self.put_count.lock().unwrap() += 1;

        if *self.fail_puts.lock().unwrap() {
            return Err(Error::Publish {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "AccessDenied: mock failure".to_string(),
            });
        }

        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: Some(content_type.to_string()),
            },
        );
        Ok(())
    }
}
