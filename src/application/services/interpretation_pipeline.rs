use std::sync::Arc;

use serde::Serialize;

use crate::application::services::{
    SignSequenceBuilder, SimplificationError, SimplificationService, TranscriptionService,
    TranscriptionServiceError,
};
use crate::domain::{
    AudioChunk, ResolvedSign, SignProvider, SimplificationProvider, TranscriptionProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("no audio payload supplied")]
    MissingAudio,
    #[error("no text supplied")]
    EmptyText,
}

impl From<TranscriptionServiceError> for InterpretationError {
    fn from(e: TranscriptionServiceError) -> Self {
        match e {
            TranscriptionServiceError::MissingAudio => InterpretationError::MissingAudio,
        }
    }
}

impl From<SimplificationError> for InterpretationError {
    fn from(e: SimplificationError) -> Self {
        match e {
            SimplificationError::EmptyText => InterpretationError::EmptyText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProviders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionProvider>,
    pub simplification: SimplificationProvider,
    pub signs: SignProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub normalized_text: String,
    pub keywords: Vec<String>,
    pub gloss_sequence: Vec<String>,
    pub videos: Vec<ResolvedSign>,
    pub providers: StageProviders,
}

/// Transcription, simplification and sign resolution, run strictly in that order.
pub struct InterpretationPipeline {
    transcription: Arc<TranscriptionService>,
    simplification: Arc<SimplificationService>,
    sign_builder: Arc<SignSequenceBuilder>,
}

impl InterpretationPipeline {
    pub fn new(
        transcription: Arc<TranscriptionService>,
        simplification: Arc<SimplificationService>,
        sign_builder: Arc<SignSequenceBuilder>,
    ) -> Self {
        Self {
            transcription,
            simplification,
            sign_builder,
        }
    }

    #[tracing::instrument(skip(self, chunk), fields(bytes = chunk.data.len()))]
    pub async fn interpret_audio(
        &self,
        chunk: &AudioChunk,
    ) -> Result<Interpretation, InterpretationError> {
        let transcript = self.transcription.transcribe(chunk).await?;
        let mut interpretation = self.interpret_text(&transcript.text).await?;

        interpretation.transcript = Some(transcript.text);
        interpretation.locale = Some(transcript.locale);
        interpretation.confidence = Some(transcript.confidence);
        interpretation.providers.transcription = Some(transcript.provider);

        Ok(interpretation)
    }

    #[tracing::instrument(skip(self, text))]
    pub async fn interpret_text(&self, text: &str) -> Result<Interpretation, InterpretationError> {
        let simplified = self.simplification.simplify(text).await?;
        let sequence = self
            .sign_builder
            .build(&simplified.gloss_sequence, &simplified.keywords)
            .await;

        let substituted = sequence.signs.iter().filter(|s| s.was_substituted()).count();
        tracing::info!(
            tokens = simplified.gloss_sequence.len(),
            videos = sequence.signs.len(),
            substituted,
            simplification = %simplified.provider,
            signs = %sequence.provider,
            "Interpretation completed"
        );

        Ok(Interpretation {
            transcript: None,
            locale: None,
            confidence: None,
            normalized_text: simplified.normalized_text,
            keywords: simplified.keywords,
            gloss_sequence: sequence.signs.iter().map(|s| s.gloss.clone()).collect(),
            videos: sequence.signs,
            providers: StageProviders {
                transcription: None,
                simplification: simplified.provider,
                signs: sequence.provider,
            },
        })
    }
}
