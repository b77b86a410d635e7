use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;

/// Body of the incoming-webhook POST.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Payload {
    pub channel: String,
    pub username: String,
    pub text: String,
    pub icon_emoji: String,
    /// Asks the chat service to resolve `@` mentions; always 1.
    pub link_names: u8,
}

impl Payload {
    pub fn new(config: &Config, text: impl Into<String>) -> Self {
        Self {
            channel: config.channel.clone(),
            username: config.user_name.clone(),
            text: text.into(),
            icon_emoji: config.icon_emoji.clone(),
            link_names: 1,
        }
    }
}

pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.webhook_url.clone(), config.timeout())
    }

    /// Single POST, no retry. Non-2xx statuses are errors; the body is ignored.
    pub async fn post(&self, payload: &Payload) -> Result<()> {
        debug!("Posting to webhook: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .context("Failed to send webhook request")?;

        response
            .error_for_status()
            .context("Webhook rejected the message")?;
        Ok(())
    }
}
