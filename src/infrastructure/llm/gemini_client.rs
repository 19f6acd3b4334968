use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    EngineTranscript, LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::AudioChunk;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const TRANSCRIBE_INSTRUCTION: &str =
    "Transcribe the speech in this audio clip verbatim. Reply with the transcript only.";

/// `generateContent` client used for both audio transcription and text simplification.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug)]
enum GenerateError {
    Request(String),
    RateLimited,
    Status(u16, String),
    Parse(String),
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }

    async fn generate(&self, parts: Vec<Part<'_>>) -> Result<String, GenerateError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerateError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status(status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| GenerateError::Parse("empty candidates".to_string()))?;

        Ok(text)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.generate(vec![Part::Text { text: prompt }])
            .await
            .map_err(|e| match e {
                GenerateError::Request(msg) => LlmClientError::ApiRequestFailed(msg),
                GenerateError::RateLimited => LlmClientError::RateLimited,
                GenerateError::Status(status, body) => {
                    LlmClientError::ApiRequestFailed(format!("HTTP {}: {}", status, body))
                }
                GenerateError::Parse(msg) => LlmClientError::InvalidResponse(msg),
            })
    }
}

#[async_trait]
impl TranscriptionEngine for GeminiClient {
    #[tracing::instrument(skip(self, chunk), fields(model = %self.model, bytes = chunk.data.len()))]
    async fn transcribe(&self, chunk: &AudioChunk) -> Result<EngineTranscript, TranscriptionError> {
        let parts = vec![
            Part::Text {
                text: TRANSCRIBE_INSTRUCTION,
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: &chunk.mime_type,
                    data: STANDARD.encode(&chunk.data),
                },
            },
        ];

        let text = self.generate(parts).await.map_err(|e| match e {
            GenerateError::Request(msg) => TranscriptionError::ApiRequestFailed(msg),
            GenerateError::RateLimited => TranscriptionError::UnexpectedStatus {
                status: 429,
                body: "rate limited".to_string(),
            },
            GenerateError::Status(status, body) => {
                TranscriptionError::UnexpectedStatus { status, body }
            }
            GenerateError::Parse(msg) => TranscriptionError::InvalidResponse(msg),
        })?;

        tracing::info!(chars = text.len(), "Cloud transcription completed");

        Ok(EngineTranscript::text_only(text.trim()))
    }
}
