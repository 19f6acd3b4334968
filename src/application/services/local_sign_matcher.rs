use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{Embedder, MatcherError, SignMatcher};
use crate::application::services::SignCatalogue;
use crate::domain::{Embedding, MatchResult, SignRecord};

const KEYWORD_OVERLAP_WEIGHT: f32 = 0.7;
const TOPIC_WEIGHT: f32 = 0.15;
const TOPIC_BOOST: f32 = 0.15;
const COSINE_WEIGHT: f32 = 0.3;

/// Heuristic matcher over the in-memory catalogue. Never fails.
pub struct LocalSignMatcher {
    catalogue: Arc<SignCatalogue>,
    embedder: Arc<dyn Embedder>,
}

impl LocalSignMatcher {
    pub fn new(catalogue: Arc<SignCatalogue>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            catalogue,
            embedder,
        }
    }

    pub fn rank(&self, keywords: &[String], top_k: usize) -> Vec<MatchResult> {
        let mut seen = HashSet::new();
        let query: Vec<String> = keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| seen.insert(k.clone()))
            .collect();

        // only the first keyword feeds the vector term
        let query_vector = match query.first() {
            Some(first) => self.embedder.embed(first),
            None => Embedding::zeros(self.embedder.dimensions()),
        };

        let mut scored: Vec<MatchResult> = self
            .catalogue
            .records()
            .iter()
            .filter_map(|record| {
                let score = score_record(record, &query, &query_vector);
                (score > 0.0).then(|| to_match(record, score))
            })
            .collect();

        // sort_by is stable, so equal scores keep catalogue order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

pub fn score_record(record: &SignRecord, query: &[String], query_vector: &Embedding) -> f32 {
    let overlap = query.iter().filter(|k| record.has_keyword(k)).count() as f32;
    let topic_boost = if query.iter().any(|k| record.has_topic(k)) {
        TOPIC_BOOST
    } else {
        0.0
    };
    let cosine = query_vector.cosine_similarity(&record.embedding);

    KEYWORD_OVERLAP_WEIGHT * overlap + TOPIC_WEIGHT * topic_boost + COSINE_WEIGHT * cosine
}

fn to_match(record: &SignRecord, score: f32) -> MatchResult {
    MatchResult {
        id: record.id.clone(),
        gloss: record.gloss.clone(),
        video_file: record.video_file.clone(),
        thumbnail: record.thumbnail.clone(),
        duration_ms: record.duration_ms,
        score,
    }
}

#[async_trait]
impl SignMatcher for LocalSignMatcher {
    #[tracing::instrument(skip(self, keywords), fields(keywords = keywords.len()))]
    async fn search(
        &self,
        keywords: &[String],
        top_k: usize,
    ) -> Result<Vec<MatchResult>, MatcherError> {
        let matches = self.rank(keywords, top_k);
        tracing::debug!(matches = matches.len(), "Local sign match completed");
        Ok(matches)
    }
}
