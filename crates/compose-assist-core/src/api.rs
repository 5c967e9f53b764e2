//! Outbound reply generation.

use std::time::Duration;

use async_trait::async_trait;
use compose_assist_config::GeneratorConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::GenerationError;
use crate::tone::find_tone;

/// Shortest email content the companion form accepts, in characters.
pub const MIN_COMPANION_CONTENT_CHARS: usize = 10;

/// Request body sent to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub email_content: String,
    pub tone: String,
}

impl GenerationRequest {
    pub fn new(email_content: impl Into<String>, tone: impl Into<String>) -> Self {
        Self {
            email_content: email_content.into(),
            tone: tone.into(),
        }
    }

    /// Request built from the companion form. Unlike the in-page flow, the
    /// form rejects short content and tones outside the catalog.
    pub fn companion(email_content: &str, tone: &str) -> Result<Self, GenerationError> {
        let chars = email_content.chars().count();
        if chars < MIN_COMPANION_CONTENT_CHARS {
            return Err(GenerationError::InvalidRequest(format!(
                "email content must be at least {MIN_COMPANION_CONTENT_CHARS} characters, got {chars}"
            )));
        }
        if find_tone(tone).is_none() {
            return Err(GenerationError::InvalidRequest(format!("unknown tone {tone:?}")));
        }
        Ok(Self::new(email_content, tone))
    }
}

/// Something that turns email content and a tone into reply text.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// HTTP client for `POST {base_url}/generate`. The response body is the
/// reply as plain text.
#[derive(Debug, Clone)]
pub struct HttpReplyGenerator {
    client: Client,
    endpoint: Url,
}

impl HttpReplyGenerator {
    /// Client with default timeouts.
    pub fn new(base_url: &str) -> Result<Self, GenerationError> {
        Self::from_config(&GeneratorConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let endpoint = Self::endpoint_for(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn endpoint_for(base_url: &str) -> Result<Url, GenerationError> {
        let url = Url::parse(&format!("{}/generate", base_url.trim().trim_end_matches('/')))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GenerationError::InvalidEndpoint(format!(
                "unsupported scheme {other:?}"
            ))),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyGenerator for HttpReplyGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!(endpoint = %self.endpoint, tone = %request.tone, "requesting reply");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
