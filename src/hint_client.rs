//! HTTP client for the move-suggestion service.

use crate::config::AppConfig;
use derive_more::{Display, Error};
use gebeta_rules::{HintReply, HintRequest, HintResponse};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Source of move suggestions.
#[async_trait::async_trait]
pub trait HintProvider: Send + Sync {
    /// Asks for a suggestion for the position in `request`.
    async fn suggest(&self, request: &HintRequest) -> Result<HintResponse, HintError>;
}

/// Client for a suggestion service speaking the `/suggest-move` contract.
#[derive(Debug, Clone)]
pub struct HintClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HintClient {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Self {
        info!("Creating hint client");
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Creates a client from application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.hint_url(), config.hint_timeout())
    }

    /// The service's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the service answers its health endpoint.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<(), HintError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HintError::new(format!("Health check failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "Hint service healthy");
            Ok(())
        } else {
            Err(HintError::new(format!("Health check returned {}", status)))
        }
    }
}

#[async_trait::async_trait]
impl HintProvider for HintClient {
    #[instrument(skip(self, request), fields(base_url = %self.base_url, player = %request.current_player, variant = %request.variant))]
    async fn suggest(&self, request: &HintRequest) -> Result<HintResponse, HintError> {
        debug!("Sending hint request");
        let response = self
            .client
            .post(format!("{}/suggest-move", self.base_url))
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| HintError::new(format!("Hint request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HintError::new(format!("Failed to read hint response: {}", e)))?;

        let reply: Option<HintReply> = serde_json::from_str(&body).ok();
        match (status.is_success(), reply) {
            (true, Some(HintReply::Suggestion(suggestion))) => {
                info!(hole = suggestion.suggested_hole, confidence = suggestion.confidence, "Hint received");
                Ok(suggestion)
            }
            (_, Some(HintReply::Failure { error })) => Err(HintError::new(format!("Hint service error: {}", error))),
            (true, _) => Err(HintError::new(format!("Malformed hint response: {}", body))),
            (false, _) => Err(HintError::new(format!("Hint service returned {}: {}", status, body))),
        }
    }
}

/// Hint collaborator failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Hint error: {} at {}:{}", message, file, line)]
pub struct HintError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HintError {
    /// Creates a new hint error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "Hint error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
