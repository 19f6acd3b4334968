use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType, PointId,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder, VectorsConfig,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use crate::domain::{Embedding, MatchResult, SignRecord};

pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
}

impl QdrantAdapter {
    pub fn new(url: &str, collection_name: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
        })
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

/// Sign ids are free-form strings; the index needs UUIDs, so derive a stable one.
pub fn sign_point_id(sign_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, sign_id.as_bytes())
}

fn sign_payload(sign: &SignRecord) -> HashMap<String, serde_json::Value> {
    let mut payload: HashMap<String, serde_json::Value> = HashMap::new();
    payload.insert("id".to_string(), serde_json::Value::String(sign.id.clone()));
    payload.insert(
        "gloss".to_string(),
        serde_json::Value::String(sign.gloss.clone()),
    );
    payload.insert(
        "videoFile".to_string(),
        serde_json::Value::String(sign.video_file.clone()),
    );
    payload.insert(
        "thumbnail".to_string(),
        serde_json::Value::String(sign.thumbnail.clone()),
    );
    payload.insert(
        "durationMs".to_string(),
        serde_json::Value::Number(sign.duration_ms.into()),
    );
    payload
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        if self.collection_exists().await? {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Distance::Cosine,
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection_created");

        for index in &config.payload_indexes {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection_name,
                    &index.field_name,
                    FieldType::Keyword,
                ))
                .await
                .map_err(|e| VectorStoreError::PayloadIndexFailed(e.to_string()))?;

            info!(
                collection = %self.collection_name,
                field = %index.field_name,
                "payload_index_applied"
            );
        }

        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self, signs), fields(collection = %self.collection_name, count = signs.len()))]
    async fn upsert_signs(&self, signs: &[SignRecord]) -> Result<(), VectorStoreError> {
        let points: Vec<PointStruct> = signs
            .iter()
            .map(|sign| {
                PointStruct::new(
                    PointId::from(sign_point_id(&sign.id).to_string()),
                    sign.embedding.values.clone(),
                    sign_payload(sign),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, count = signs.len(), "signs_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<MatchResult>, VectorStoreError> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    embedding.values.clone(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results: Vec<MatchResult> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;

                let id = payload.get("id")?.as_str()?.to_string();
                let gloss = payload.get("gloss")?.as_str()?.to_string();
                let video_file = payload.get("videoFile")?.as_str()?.to_string();
                let thumbnail = payload
                    .get("thumbnail")
                    .and_then(|v| v.as_str())
                    .cloned()
                    .unwrap_or_default();
                let duration_ms = payload
                    .get("durationMs")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u32::try_from(v).ok())
                    .unwrap_or(0);

                Some(MatchResult {
                    id,
                    gloss,
                    video_file,
                    thumbnail,
                    duration_ms,
                    score: point.score,
                })
            })
            .collect();

        Ok(results)
    }
}
