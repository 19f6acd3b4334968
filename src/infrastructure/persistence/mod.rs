mod qdrant_adapter;

pub use qdrant_adapter::{QdrantAdapter, sign_point_id};
