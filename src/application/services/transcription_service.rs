use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{EngineTranscript, TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioChunk, TranscriptionProvider, TranscriptionResult};
use crate::infrastructure::observability::sanitize_prompt;

pub const CLOUD_CONFIDENCE: f32 = 0.9;
pub const MOCK_CONFIDENCE: f32 = 0.3;
pub const LOCAL_DEFAULT_CONFIDENCE: f32 = 0.85;
pub const DEFAULT_MOCK_TRANSCRIPT: &str = "Hello everyone, let's start the meeting today";

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("no audio payload supplied")]
    MissingAudio,
}

/// Local speech endpoint, then cloud AI, then a fixed transcript. Each tier runs at most once.
pub struct TranscriptionService {
    local: Option<Arc<dyn TranscriptionEngine>>,
    cloud: Option<Arc<dyn TranscriptionEngine>>,
    local_timeout: Duration,
    fallback_locale: String,
    mock_transcript: String,
}

impl TranscriptionService {
    pub fn new(
        local: Option<Arc<dyn TranscriptionEngine>>,
        cloud: Option<Arc<dyn TranscriptionEngine>>,
        local_timeout: Duration,
        fallback_locale: String,
        mock_transcript: String,
    ) -> Self {
        Self {
            local,
            cloud,
            local_timeout,
            fallback_locale,
            mock_transcript,
        }
    }

    #[tracing::instrument(skip(self, chunk), fields(bytes = chunk.data.len(), mime_type = %chunk.mime_type))]
    pub async fn transcribe(
        &self,
        chunk: &AudioChunk,
    ) -> Result<TranscriptionResult, TranscriptionServiceError> {
        if chunk.is_empty() {
            return Err(TranscriptionServiceError::MissingAudio);
        }

        let requested_locale = chunk
            .locale
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.fallback_locale.clone());

        if let Some(local) = &self.local {
            match self.transcribe_local(local.as_ref(), chunk).await {
                Ok(transcript) => {
                    tracing::info!(
                        provider = "local",
                        text = %sanitize_prompt(&transcript.text),
                        "Transcription completed"
                    );
                    return Ok(TranscriptionResult {
                        text: transcript.text,
                        locale: transcript
                            .locale
                            .filter(|l| !l.trim().is_empty())
                            .unwrap_or(requested_locale),
                        confidence: transcript
                            .confidence
                            .filter(|c| c.is_finite())
                            .map(|c| c.clamp(0.0, 1.0))
                            .unwrap_or(LOCAL_DEFAULT_CONFIDENCE),
                        provider: TranscriptionProvider::Local,
                    });
                }
                Err(e) => {
                    tracing::warn!(tier = "local", error = %e, "Local transcription failed");
                }
            }
        }

        if let Some(cloud) = &self.cloud {
            match cloud.transcribe(chunk).await.and_then(non_empty) {
                Ok(transcript) => {
                    tracing::info!(
                        provider = "cloud",
                        text = %sanitize_prompt(&transcript.text),
                        "Transcription completed"
                    );
                    return Ok(TranscriptionResult {
                        text: transcript.text,
                        locale: requested_locale,
                        confidence: CLOUD_CONFIDENCE,
                        provider: TranscriptionProvider::Cloud,
                    });
                }
                Err(e) => {
                    tracing::warn!(tier = "cloud", error = %e, "Cloud transcription failed");
                }
            }
        }

        tracing::info!(provider = "mock", "Using mock transcript");
        Ok(TranscriptionResult {
            text: self.mock_transcript.clone(),
            locale: requested_locale,
            confidence: MOCK_CONFIDENCE,
            provider: TranscriptionProvider::Mock,
        })
    }

    async fn transcribe_local(
        &self,
        engine: &dyn TranscriptionEngine,
        chunk: &AudioChunk,
    ) -> Result<EngineTranscript, TranscriptionError> {
        // dropping the future on timeout aborts the in-flight request
        match tokio::time::timeout(self.local_timeout, engine.transcribe(chunk)).await {
            Ok(result) => result.and_then(non_empty),
            Err(_) => Err(TranscriptionError::Timeout(
                self.local_timeout.as_millis() as u64,
            )),
        }
    }
}

fn non_empty(mut transcript: EngineTranscript) -> Result<EngineTranscript, TranscriptionError> {
    transcript.text = transcript.text.trim().to_string();
    if transcript.text.is_empty() {
        return Err(TranscriptionError::EmptyTranscript);
    }
    Ok(transcript)
}
