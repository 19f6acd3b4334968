pub mod catalogue;
pub mod embedding;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod stt;
