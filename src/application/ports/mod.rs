mod collection_config;
mod embedder;
mod llm_client;
mod sign_matcher;
mod transcription_engine;
mod vector_store;
mod vector_store_error;

pub use collection_config::{CollectionConfig, PayloadIndex};
pub use embedder::Embedder;
pub use llm_client::{LlmClient, LlmClientError};
pub use sign_matcher::{MatcherError, SignMatcher};
pub use transcription_engine::{EngineTranscript, TranscriptionEngine, TranscriptionError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
