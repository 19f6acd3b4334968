use async_trait::async_trait;

use crate::domain::AudioChunk;

/// Raw output of one speech backend, before the provider tag and defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTranscript {
    pub text: String,
    pub locale: Option<String>,
    pub confidence: Option<f32>,
}

impl EngineTranscript {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locale: None,
            confidence: None,
        }
    }
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, chunk: &AudioChunk) -> Result<EngineTranscript, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty transcript")]
    EmptyTranscript,
    #[error("timed out after {0} ms")]
    Timeout(u64),
}
