//! Single-step image transcoding pipeline
//!
//! Fetches a source image from object storage, scales it to fit a requested
//! bounding box without distortion, and publishes the result under a key
//! derived from the requested size.

pub mod error;
pub mod image;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod storage;

pub use error::{Error, Result};
