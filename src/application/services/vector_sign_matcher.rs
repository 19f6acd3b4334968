use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{Embedder, MatcherError, SignMatcher, VectorStore};
use crate::domain::MatchResult;

/// Queries the vector index once per keyword and keeps the best score seen per sign.
pub struct VectorSignMatcher<V>
where
    V: VectorStore,
{
    vector_store: Arc<V>,
    embedder: Arc<dyn Embedder>,
}

impl<V> VectorSignMatcher<V>
where
    V: VectorStore,
{
    pub fn new(vector_store: Arc<V>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
        }
    }
}

#[async_trait]
impl<V> SignMatcher for VectorSignMatcher<V>
where
    V: VectorStore,
{
    #[tracing::instrument(skip(self, keywords), fields(keywords = keywords.len()))]
    async fn search(
        &self,
        keywords: &[String],
        top_k: usize,
    ) -> Result<Vec<MatchResult>, MatcherError> {
        let mut merged: Vec<MatchResult> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for keyword in keywords {
            let embedding = self.embedder.embed(keyword);
            let hits = self.vector_store.search(&embedding, top_k).await?;

            for hit in hits {
                match positions.get(&hit.id) {
                    Some(&index) => {
                        if hit.score > merged[index].score {
                            merged[index].score = hit.score;
                        }
                    }
                    None => {
                        positions.insert(hit.id.clone(), merged.len());
                        merged.push(hit);
                    }
                }
            }
        }

        merged.sort_by(|a, b| b.score.total_cmp(&a.score));
        merged.truncate(top_k);

        tracing::debug!(matches = merged.len(), "Vector sign match completed");
        Ok(merged)
    }
}
