//! CLI for editprobe - one-shot check of the OpenAI image edits endpoint.

use clap::Parser;
use editprobe::{Probe, ProbeConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "editprobe")]
#[command(about = "Fetch a sample image, edit it via the OpenAI images API, save the result")]
#[command(version)]
struct Cli {
    /// URL of the input image
    #[arg(long)]
    image_url: Option<String>,

    /// Edit prompt
    #[arg(long)]
    prompt: Option<String>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Output size (e.g., 1024x1024)
    #[arg(long)]
    size: Option<String>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Environment variable holding the API key
    #[arg(long)]
    env_var: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long)]
    fetch_timeout: Option<u64>,

    /// Edit request timeout in seconds
    #[arg(long)]
    edit_timeout: Option<u64>,

    /// Output a JSON summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> ProbeConfig {
        let mut builder = ProbeConfig::builder();
        if let Some(url) = self.image_url {
            builder = builder.image_url(url);
        }
        if let Some(prompt) = self.prompt {
            builder = builder.prompt(prompt);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        if let Some(size) = self.size {
            builder = builder.size(size);
        }
        if let Some(base) = self.base_url {
            builder = builder.base_url(base);
        }
        if let Some(var) = self.env_var {
            builder = builder.env_var(var);
        }
        if let Some(secs) = self.fetch_timeout {
            builder = builder.fetch_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.edit_timeout {
            builder = builder.edit_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "editprobe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    let probe = Probe::new(cli.into_config());

    // Failures are reported through the log only; the process exits normally.
    let success = probe.run().await;

    if json_output {
        let config = probe.config();
        let result = serde_json::json!({
            "success": success,
            "output": config.output.display().to_string(),
            "model": config.model,
            "size": config.size,
            "written": success && config.output.is_file(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
