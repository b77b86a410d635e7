mod candidates;
mod config;
mod message;
mod sampler;
mod webhook;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::message::MessageTemplate;
use crate::sampler::ClockSeededSource;
use crate::webhook::{Payload, WebhookClient};

const USAGE: &str = "usage: lunchbot <config_path>";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lunchbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = PathBuf::from(&args[1]);
    let (config, text) = match prepare(&config_path) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Delivery problems are reported but never fail the run.
    match deliver(&config, text).await {
        Ok(()) => info!("Recommendation posted to {}", config.channel),
        Err(e) => warn!("Posting error: {:#}", e),
    }
    ExitCode::SUCCESS
}

/// Load configuration and compose the message. Any error here is fatal.
fn prepare(config_path: &Path) -> Result<(Config, String)> {
    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(config_path)?;

    let template = MessageTemplate::new();
    let mut source = ClockSeededSource::new();

    let list = candidates::load_candidates(&config.shop_list)?;
    info!("Loaded {} candidates", list.len());

    let text = message::compose(&list, &mut source, &template)
        .context("Failed to compose recommendation")?;
    Ok((config, text))
}

async fn deliver(config: &Config, text: String) -> Result<()> {
    let client = WebhookClient::from_config(config)?;
    client.post(&Payload::new(config, text)).await
}
