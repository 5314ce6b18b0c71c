use anyhow::{bail, Context, Result};
use clap::Parser;
use image_resizer::models::{Config, ResizeRequest};
use image_resizer::pipeline::Pipeline;
use std::io::Read;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "image-resizer")]
#[command(about = "Resize one image from object storage into a size-prefixed key")]
struct CliArgs {
    /// Source object key, e.g. photo.jpg
    #[arg(long, requires = "size", conflicts_with = "event")]
    image: Option<String>,

    /// Bounding box as WIDTHxHEIGHT, e.g. 200x200
    #[arg(long, requires = "image", conflicts_with = "event")]
    size: Option<String>,

    /// Trigger payload as JSON, `@path` to read it from a file, or `-` for stdin
    #[arg(long, value_name = "JSON")]
    event: Option<String>,
}

fn parse_event(raw: &str) -> Result<ResizeRequest> {
    let json = match raw {
        "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
        path if path.starts_with('@') => std::fs::read_to_string(&path[1..])
            .with_context(|| format!("Failed to read event file '{}'", &path[1..]))?,
        inline => inline.to_string(),
    };

    serde_json::from_str(&json).context("Event must be {\"image\": ..., \"size\": ...}")
}

fn request_from_args(args: CliArgs) -> Result<ResizeRequest> {
    match (args.event, args.image, args.size) {
        (Some(event), _, _) => parse_event(&event),
        (None, Some(image), Some(size)) => Ok(ResizeRequest { image, size }),
        _ => bail!("Provide either --event or both --image and --size"),
    }
}

async fn init_pipeline() -> image_resizer::Result<Pipeline> {
    Pipeline::new(Config::from_env()?).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_resizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let request = request_from_args(CliArgs::parse())?;

    let pipeline = match init_pipeline().await {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Failed to initialize pipeline: {}", e);
            std::process::exit(1);
        }
    };

    match pipeline.run(&request).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string(&outcome)?);
            Ok(())
        }
        // The pipeline already logged the failure
        Err(_) => std::process::exit(1),
    }
}
