//! Pipeline orchestration for one resize invocation.
//!
//! Interpret, fetch, resize and publish run strictly in order; the first
//! failure stops the rest and becomes the invocation's single result.

use crate::image::{ImageResizer, ImageService};
use crate::models::{Config, ResizeOutcome, ResizeRequest};
use crate::request::{self, ResizePlan};
use crate::storage::{ObjectStore, S3Store};
use crate::Result;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Runs resize invocations against configured source and destination buckets.
pub struct Pipeline {
    storage: Box<dyn ObjectStore>,
    image: Box<dyn ImageService>,
    config: Config,
}

/// Injectable service bundle used to construct [`Pipeline`] in tests/harnesses.
pub struct PipelineServices {
    pub storage: Box<dyn ObjectStore>,
    pub image: Box<dyn ImageService>,
}

impl Pipeline {
    /// Build a pipeline from concrete service dependencies.
    pub fn with_services(services: PipelineServices, config: Config) -> Self {
        Self {
            storage: services.storage,
            image: services.image,
            config,
        }
    }

    /// Construct a pipeline backed by S3 and the `image` crate.
    pub async fn new(config: Config) -> Result<Self> {
        let storage = Box::new(S3Store::new(&config).await?);
        info!(
            "Source bucket: {}, destination bucket: {}",
            config.source_bucket, config.destination_bucket
        );

        Ok(Self::with_services(
            PipelineServices {
                storage,
                image: Box::new(ImageResizer::new()),
            },
            config,
        ))
    }

    /// Run one invocation and log its completion exactly once.
    pub async fn run(&self, request: &ResizeRequest) -> Result<ResizeOutcome> {
        let span = info_span!("invocation", id = %Uuid::new_v4(), image = %request.image);

        async {
            let src = format!("{}/{}", self.config.source_bucket, request.image);
            let dst = format!(
                "{}/{}",
                self.config.destination_bucket,
                request::destination_key(&request.size, &request.image)
            );

            match self.execute(request).await {
                Ok(outcome) => {
                    info!("Successfully resized {} and uploaded to {}", src, dst);
                    Ok(outcome)
                }
                Err(e) => {
                    error!(
                        stage = e.stage(),
                        "Unable to resize {} and upload to {} due to an error: {}", src, dst, e
                    );
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: &ResizeRequest) -> Result<ResizeOutcome> {
        let plan = request::interpret(request)?;
        debug!(
            "Resizing {} ({}) to fit {}",
            plan.source_key, plan.format, plan.bounds
        );

        let source = self
            .storage
            .get_object(&self.config.source_bucket, &plan.source_key)
            .await?;
        debug!("Fetched {} bytes", source.body.len());

        let content_type = source
            .content_type
            .unwrap_or_else(|| plan.format.mime_type().to_string());

        let resized = self
            .image
            .resize(source.body, plan.format, plan.bounds)
            .await?;
        debug!(
            "Resized from {} to {} ({} bytes)",
            resized.native,
            resized.output,
            resized.data.len()
        );

        self.publish(&plan, resized.data, &content_type).await
    }

    async fn publish(
        &self,
        plan: &ResizePlan,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ResizeOutcome> {
        self.storage
            .put_object(
                &self.config.destination_bucket,
                &plan.destination_key,
                data,
                content_type,
            )
            .await?;

        Ok(ResizeOutcome {
            location: format!("{}{}", self.config.base_url, plan.destination_key),
        })
    }
}
