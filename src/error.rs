//! Error handling and custom error types
//!
//! Every pipeline stage fails with its own variant so the single completion
//! report can say where an invocation stopped.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine the image type of '{0}'")]
    Format(String),

    #[error("Unsupported image type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid size '{spec}': {reason}")]
    InvalidSizeSpec { spec: String, reason: String },

    #[error("Failed to fetch {bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to resize image: {0}")]
    Resize(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to publish {bucket}/{key}: {message}")]
    Publish {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Format(_) | Error::UnsupportedFormat(_) | Error::InvalidSizeSpec { .. } => {
                "interpret"
            }
            Error::Fetch { .. } => "fetch",
            Error::Decode(_) | Error::Resize(_) | Error::Encode(_) => "resize",
            Error::Publish { .. } => "publish",
            Error::Config(_) | Error::Invariant(_) => "host",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Error::Format("diagram".to_string()).stage(), "interpret");
        assert_eq!(Error::Resize("zero width".to_string()).stage(), "resize");
        assert_eq!(Error::Config("SOURCE_BUCKET".to_string()).stage(), "host");
        assert_eq!(Error::Invariant("join".to_string()).stage(), "host");
        let err = Error::Publish {
            bucket: "img-resized".to_string(),
            key: "200x200/photo.jpg".to_string(),
            message: "denied".to_string(),
        };
        assert_eq!(err.stage(), "publish");
    }

    #[test]
    fn test_fetch_message_names_object() {
        let err = Error::Fetch {
            bucket: "img-sources".to_string(),
            key: "photo.jpg".to_string(),
            message: "NoSuchKey".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch img-sources/photo.jpg: NoSuchKey"
        );
    }
}
