use crate::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use crate::application::services::SignCatalogue;

/// Creates the sign collection if needed and upserts every catalogue record.
///
/// Returns the number of signs written.
#[tracing::instrument(skip(store, catalogue), fields(signs = catalogue.len()))]
pub async fn seed_catalogue(
    store: &dyn VectorStore,
    catalogue: &SignCatalogue,
    dimensions: usize,
) -> Result<usize, VectorStoreError> {
    let created = store
        .create_collection(&CollectionConfig::new(dimensions as u64))
        .await?;
    store.upsert_signs(catalogue.records()).await?;

    tracing::info!(created, "Sign collection seeded");
    Ok(catalogue.records().len())
}
