use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::application::ports::Embedder;
use crate::application::services::CatalogueError;
use crate::domain::{Embedding, SignRecord};

pub const BUILTIN_CATALOGUE: &str = include_str!("../../../data/signs.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueEntry {
    id: String,
    gloss: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
    video_file: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    duration_ms: u32,
}

impl CatalogueEntry {
    fn into_record(self, embedder: &dyn Embedder) -> SignRecord {
        let keywords: BTreeSet<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let topics: BTreeSet<String> = self
            .topics
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let gloss = self.gloss.trim().to_uppercase();

        let embedding = match self.embedding {
            Some(values) if values.len() == embedder.dimensions() => Embedding::new(values),
            Some(values) => {
                tracing::warn!(
                    gloss = %gloss,
                    dimensions = values.len(),
                    expected = embedder.dimensions(),
                    "Stored embedding has the wrong size, recomputing"
                );
                embed_sign(embedder, &gloss, &keywords)
            }
            None => embed_sign(embedder, &gloss, &keywords),
        };

        SignRecord {
            id: self.id,
            gloss,
            keywords,
            topics,
            embedding,
            video_file: self.video_file,
            thumbnail: self.thumbnail,
            duration_ms: self.duration_ms,
        }
    }
}

fn embed_sign(embedder: &dyn Embedder, gloss: &str, keywords: &BTreeSet<String>) -> Embedding {
    let text = std::iter::once(gloss.to_lowercase())
        .chain(keywords.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");
    embedder.embed(&text)
}

pub fn parse_catalogue(json: &str, embedder: &dyn Embedder) -> Result<Vec<SignRecord>, CatalogueError> {
    let entries: Vec<CatalogueEntry> =
        serde_json::from_str(json).map_err(|e| CatalogueError::Source(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| entry.into_record(embedder))
        .collect())
}

pub fn load_catalogue_file(
    path: &Path,
    embedder: &dyn Embedder,
) -> Result<Vec<SignRecord>, CatalogueError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogueError::Source(format!("{}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "Loading sign catalogue from file");
    parse_catalogue(&contents, embedder)
}
