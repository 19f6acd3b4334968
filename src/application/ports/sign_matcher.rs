use async_trait::async_trait;

use super::VectorStoreError;
use crate::domain::MatchResult;

/// Ranks catalogue signs against a set of query keywords.
#[async_trait]
pub trait SignMatcher: Send + Sync {
    async fn search(&self, keywords: &[String], top_k: usize)
    -> Result<Vec<MatchResult>, MatcherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("vector search: {0}")]
    VectorSearch(#[from] VectorStoreError),
}
