mod placeholder_embedder;

pub use placeholder_embedder::{DEFAULT_EMBEDDING_DIMENSION, PlaceholderEmbedder};
