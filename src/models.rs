//! Data models and structures
//!
//! Defines the trigger payload, the supported image formats, the completion
//! payload and the runtime configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trigger payload delivered by the host for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResizeRequest {
    /// Source object key, e.g. `photo.jpg`.
    pub image: String,
    /// Bounding box as `WIDTHxHEIGHT`, e.g. `200x200`.
    pub size: String,
}

impl ResizeRequest {
    pub fn new(image: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            size: size.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpg,
    Png,
}

impl ImageFormat {
    /// Maps a key extension onto a supported format. Matching is exact.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn codec(&self) -> image::ImageFormat {
        match self {
            Self::Jpg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Completion payload reported on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResizeOutcome {
    pub location: String,
}

// Configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_bucket: String,
    pub destination_bucket: String,
    /// Prefix of every reported location; joined to the destination key verbatim.
    pub base_url: String,
    pub s3_endpoint: Option<String>,
    pub aws_region: Option<String>,
}

const DEFAULT_SOURCE_BUCKET: &str = "img-sources";
const DEFAULT_DESTINATION_BUCKET: &str = "img-resized";
const DEFAULT_BASE_URL: &str = "http://img-resized.s3-website-us-east-1.amazonaws.com/";

impl Default for Config {
    fn default() -> Self {
        Self {
            source_bucket: DEFAULT_SOURCE_BUCKET.to_string(),
            destination_bucket: DEFAULT_DESTINATION_BUCKET.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            s3_endpoint: None,
            aws_region: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            source_bucket: non_empty("SOURCE_BUCKET")
                .unwrap_or_else(|| DEFAULT_SOURCE_BUCKET.to_string()),
            destination_bucket: non_empty("DESTINATION_BUCKET")
                .unwrap_or_else(|| DEFAULT_DESTINATION_BUCKET.to_string()),
            base_url: non_empty("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            s3_endpoint: non_empty("S3_ENDPOINT"),
            aws_region: non_empty("AWS_REGION"),
        };

        if config.source_bucket.contains('/') {
            return Err(crate::Error::Config(format!(
                "SOURCE_BUCKET must be a bucket name, got '{}'",
                config.source_bucket
            )));
        }
        if config.destination_bucket.contains('/') {
            return Err(crate::Error::Config(format!(
                "DESTINATION_BUCKET must be a bucket name, got '{}'",
                config.destination_bucket
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_request_deserialization() {
        let request: ResizeRequest =
            serde_json::from_str(r#"{"image": "photo.jpg", "size": "200x200"}"#).unwrap();
        assert_eq!(request, ResizeRequest::new("photo.jpg", "200x200"));
    }

    #[test]
    fn test_request_missing_field() {
        let result: Result<ResizeRequest, _> = serde_json::from_str(r#"{"image": "photo.jpg"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ResizeOutcome {
            location: "http://cdn/200x200/photo.jpg".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"location":"http://cdn/200x200/photo.jpg"}"#);
    }

    #[test]
    fn test_format_extension_matching() {
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension("JPG"), None);
        assert_eq!(ImageFormat::from_extension(""), None);
    }

    #[test]
    fn test_format_mime_types() {
        assert_eq!(ImageFormat::Jpg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Png.codec(), image::ImageFormat::Png);
    }

    #[test]
    fn test_config_defaults_from_empty_lookup() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.base_url.ends_with('/'));
    }

    #[test]
    fn test_config_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SOURCE_BUCKET", "originals"),
            ("DESTINATION_BUCKET", "thumbs"),
            ("BASE_URL", "https://cdn.example.com/"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("AWS_REGION", "   "),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.source_bucket, "originals");
        assert_eq!(config.destination_bucket, "thumbs");
        assert_eq!(config.base_url, "https://cdn.example.com/");
        assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.aws_region, None);
    }

    #[test]
    fn test_config_rejects_bucket_with_slash() {
        let result = Config::from_lookup(|k| {
            (k == "SOURCE_BUCKET").then(|| "bucket/prefix".to_string())
        });
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
