use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{EngineTranscript, TranscriptionEngine, TranscriptionError};
use crate::domain::AudioChunk;

/// Client for the self-hosted Whisper server (`POST /transcribe`, `GET /health`).
pub struct LocalSttClient {
    client: Client,
    base_url: String,
    default_locale: String,
    health_timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscribeRequest<'a> {
    audio_data: &'a str,
    // the Python server reads this key
    audio_base64: &'a str,
    mime_type: &'a str,
    locale: &'a str,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocalSttHealth {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ready: bool,
}

impl LocalSttClient {
    /// `health_timeout` bounds `health()`; transcription calls are bounded by the caller.
    pub fn new(base_url: &str, default_locale: String, health_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_locale,
            health_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<LocalSttHealth, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout(self.health_timeout.as_millis() as u64)
                } else {
                    TranscriptionError::ApiRequestFailed(format!("request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::UnexpectedStatus { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse health: {}", e)))
    }
}

#[async_trait]
impl TranscriptionEngine for LocalSttClient {
    #[tracing::instrument(skip(self, chunk), fields(base_url = %self.base_url, bytes = chunk.data.len()))]
    async fn transcribe(&self, chunk: &AudioChunk) -> Result<EngineTranscript, TranscriptionError> {
        let encoded = STANDARD.encode(&chunk.data);
        let locale = chunk
            .locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_locale);

        let request = TranscribeRequest {
            audio_data: &encoded,
            audio_base64: &encoded,
            mime_type: &chunk.mime_type,
            locale,
        };

        tracing::debug!("Sending audio to local speech endpoint");

        let response = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::UnexpectedStatus { status, body });
        }

        let result: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::info!(
            chars = result.text.len(),
            server_provider = result.provider.as_deref().unwrap_or("unknown"),
            "Local transcription completed"
        );

        Ok(EngineTranscript {
            text: result.text.trim().to_string(),
            locale: result.locale,
            confidence: result.confidence,
        })
    }
}
