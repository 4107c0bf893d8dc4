//! Verification service client
//!
//! Uploads the candidate file as the single part of a multipart form and
//! parses the verdict body. No retry, no timeout, no cancellation.

use axum::body::Bytes;
use reqwest::multipart::{self, Part};
use safespeak_common::api::VerificationResult;
use thiserror::Error;

use super::USER_AGENT;
use crate::workflow::CandidateFile;

/// Shown for any non-success HTTP status
pub const VERIFY_FAILED_MESSAGE: &str = "Failed to verify audio.";

/// Verification request errors
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),
}

impl VerifyError {
    /// Description shown in the Failed state
    ///
    /// Status failures collapse to a fixed message; transport and parse
    /// failures show their own description.
    pub fn user_message(&self) -> String {
        match self {
            VerifyError::ApiError(..) => VERIFY_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Verification service client
pub struct VerificationClient {
    http_client: reqwest::Client,
    url: String,
    upload_field: String,
}

impl VerificationClient {
    /// No request timeout is set; resolution is up to the remote service
    pub fn new(url: impl Into<String>, upload_field: impl Into<String>) -> Result<Self, VerifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| VerifyError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
            upload_field: upload_field.into(),
        })
    }

    pub fn upload_field(&self) -> &str {
        &self.upload_field
    }

    /// Upload `file` and parse the verdict
    pub async fn verify(&self, file: &CandidateFile) -> Result<VerificationResult, VerifyError> {
        let file_part = audio_part(file.name(), file.media_type(), file.content().clone())?;
        let form = multipart::Form::new().part(self.upload_field.clone(), file_part);

        tracing::debug!(
            url = %self.url,
            field = %self.upload_field,
            file = %file.name(),
            bytes = file.size_bytes(),
            "Uploading audio for verification"
        );

        let response = self
            .http_client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VerifyError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %error_text, "Verification service rejected upload");
            return Err(VerifyError::ApiError(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| VerifyError::NetworkError(e.to_string()))?;

        let result: VerificationResult =
            serde_json::from_str(&body).map_err(|e| VerifyError::ParseError(e.to_string()))?;

        tracing::info!(
            verdict = %result.verdict,
            plots = result.present_plots().len(),
            extra_fields = result.extra.len(),
            "Verification result received"
        );

        Ok(result)
    }
}

/// Multipart part over the shared upload bytes (no copy)
fn audio_part(name: &str, media_type: &str, content: Bytes) -> Result<Part, VerifyError> {
    let length = content.len() as u64;
    Part::stream_with_length(reqwest::Body::from(content), length)
        .file_name(name.to_string())
        .mime_str(media_type)
        .map_err(|e| VerifyError::InvalidMediaType(format!("{}: {}", media_type, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = VerificationClient::new("http://127.0.0.1:5000/verify-audio", "audio_file").unwrap();
        assert_eq!(client.upload_field(), "audio_file");
    }

    #[test]
    fn test_bad_media_type_is_not_a_network_error() {
        let err = audio_part("sample.wav", "not a media type", Bytes::from_static(b"RIFF")).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidMediaType(_)));
        assert!(err.user_message().starts_with("Invalid media type: not a media type"));
    }

    #[test]
    fn test_audio_part_accepts_wav() {
        assert!(audio_part("sample.wav", "audio/wav", Bytes::from_static(b"RIFF")).is_ok());
    }

    #[test]
    fn test_status_failure_uses_fixed_message() {
        let err = VerifyError::ApiError(400, r#"{"error":"No audio file"}"#.to_string());
        assert_eq!(err.user_message(), VERIFY_FAILED_MESSAGE);
    }

    #[test]
    fn test_other_failures_use_description() {
        let err = VerifyError::ParseError("expected value at line 1 column 1".to_string());
        assert_eq!(err.user_message(), "Parse error: expected value at line 1 column 1");

        let err = VerifyError::NetworkError("connection refused".to_string());
        assert_eq!(err.user_message(), "Network error: connection refused");
    }
}
