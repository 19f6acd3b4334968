use async_trait::async_trait;

use super::{CollectionConfig, VectorStoreError};
use crate::domain::{Embedding, MatchResult, SignRecord};

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError>;

    async fn collection_exists(&self) -> Result<bool, VectorStoreError>;

    async fn upsert_signs(&self, signs: &[SignRecord]) -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<MatchResult>, VectorStoreError>;
}
