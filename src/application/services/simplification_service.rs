use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::application::services::text_normalizer::{extract_keywords, normalize};
use crate::domain::{SimplificationProvider, SimplificationResult};
use crate::infrastructure::observability::sanitize_prompt;

#[derive(Debug, thiserror::Error)]
pub enum SimplificationError {
    #[error("no text supplied")]
    EmptyText,
}

#[derive(Debug, thiserror::Error)]
pub enum SimplificationParseError {
    #[error("response is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("response is not a json object")]
    NotAnObject,
    #[error("response object has none of the expected fields")]
    NoFields,
}

/// The only shape accepted from the model. Unknown fields or wrong types reject the whole reply.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ModelSimplification {
    #[serde(default)]
    pub normalized_text: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub gloss_sequence: Option<Vec<String>>,
}

/// Turns free text into normalized text, keywords and a gloss sequence.
pub struct SimplificationService {
    llm_client: Option<Arc<dyn LlmClient>>,
    keyword_limit: usize,
}

impl SimplificationService {
    pub fn new(llm_client: Option<Arc<dyn LlmClient>>, keyword_limit: usize) -> Self {
        Self {
            llm_client,
            keyword_limit,
        }
    }

    #[tracing::instrument(skip(self, text))]
    pub async fn simplify(&self, text: &str) -> Result<SimplificationResult, SimplificationError> {
        if text.trim().is_empty() {
            return Err(SimplificationError::EmptyText);
        }

        let Some(llm_client) = &self.llm_client else {
            return Ok(self.mock_simplification(text));
        };

        let prompt = build_prompt(text, self.keyword_limit);
        let raw = match llm_client.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(tier = "cloud", error = %e, "Simplification request failed");
                return Ok(self.mock_simplification(text));
            }
        };

        match parse_model_output(&raw) {
            Ok(model) => Ok(self.merge_with_heuristics(text, model)),
            Err(e) => {
                tracing::warn!(
                    tier = "cloud",
                    error = %e,
                    output = %sanitize_prompt(&raw),
                    "Simplification output rejected"
                );
                Ok(self.mock_simplification(text))
            }
        }
    }

    pub fn mock_simplification(&self, text: &str) -> SimplificationResult {
        let keywords = extract_keywords(text, self.keyword_limit);
        let gloss_sequence = keywords.iter().map(|k| k.to_uppercase()).collect();

        SimplificationResult {
            normalized_text: normalize(text),
            keywords,
            gloss_sequence,
            provider: SimplificationProvider::Fallback,
        }
    }

    fn merge_with_heuristics(&self, text: &str, model: ModelSimplification) -> SimplificationResult {
        let normalized_text = model
            .normalized_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| normalize(text));

        let keywords = model
            .keywords
            .map(|k| clean_keywords(k, self.keyword_limit))
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| extract_keywords(text, self.keyword_limit));

        let gloss_sequence = model
            .gloss_sequence
            .map(clean_glosses)
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| keywords.iter().map(|k| k.to_uppercase()).collect());

        SimplificationResult {
            normalized_text,
            keywords,
            gloss_sequence,
            provider: SimplificationProvider::Cloud,
        }
    }
}

pub fn build_prompt(text: &str, keyword_limit: usize) -> String {
    format!(
        "You convert spoken English into sign language gloss.\n\
         Reply with a single JSON object and nothing else. It must have exactly these fields:\n\
         - \"normalizedText\": the sentence in lowercase without punctuation\n\
         - \"keywords\": an array of at most {keyword_limit} unique lowercase content words, in spoken order\n\
         - \"glossSequence\": an array of uppercase gloss tokens in signing order\n\
         Sentence: {text}"
    )
}

/// Accepts one JSON object, optionally wrapped in a Markdown code fence. Anything else fails.
pub fn parse_model_output(raw: &str) -> Result<ModelSimplification, SimplificationParseError> {
    let body = strip_code_fence(raw.trim());
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(SimplificationParseError::NotAnObject);
    }

    let parsed: ModelSimplification = serde_json::from_value(value)?;
    if parsed == ModelSimplification::default() {
        return Err(SimplificationParseError::NoFields);
    }
    Ok(parsed)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // drop the info string, e.g. ```json
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}

fn clean_keywords(keywords: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .take(limit)
        .collect()
}

fn clean_glosses(glosses: Vec<String>) -> Vec<String> {
    glosses
        .into_iter()
        .map(|g| g.trim().to_uppercase())
        .filter(|g| !g.is_empty())
        .collect()
}
