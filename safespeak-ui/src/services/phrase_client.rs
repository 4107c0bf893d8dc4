//! Challenge phrase client
//!
//! One `GET` per workflow activation. The phrase is advisory only, so every
//! failure is reported to the caller as a [`PhraseError`] for logging and
//! never reaches the user.

use safespeak_common::api::PhraseResponse;
use thiserror::Error;

use super::USER_AGENT;

/// Phrase fetch errors
#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Response carried no phrase")]
    MissingPhrase,
}

/// Challenge phrase service client
pub struct PhraseClient {
    http_client: reqwest::Client,
    url: String,
}

impl PhraseClient {
    /// No request timeout is set; resolution is up to the remote service
    pub fn new(url: impl Into<String>) -> Result<Self, PhraseError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PhraseError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch one challenge phrase
    pub async fn fetch_phrase(&self) -> Result<String, PhraseError> {
        tracing::debug!(url = %self.url, "Requesting challenge phrase");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PhraseError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PhraseError::ApiError(status.as_u16(), error_text));
        }

        let body: PhraseResponse = response
            .json()
            .await
            .map_err(|e| PhraseError::ParseError(e.to_string()))?;

        let phrase = body.into_phrase().ok_or(PhraseError::MissingPhrase)?;
        tracing::info!(chars = phrase.chars().count(), "Challenge phrase received");
        Ok(phrase)
    }
}
