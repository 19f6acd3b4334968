use crate::domain::Embedding;

/// Turns a piece of text into a fixed-length vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Embedding;

    fn dimensions(&self) -> usize;
}
