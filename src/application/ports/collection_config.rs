/// Shape of the sign collection in the vector index. Distance is always cosine.
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    pub payload_indexes: Vec<PayloadIndex>,
}

/// A keyword payload index on one field.
#[derive(Debug, Clone)]
pub struct PayloadIndex {
    pub field_name: String,
}

impl CollectionConfig {
    pub fn new(vector_dimensions: u64) -> Self {
        Self {
            vector_dimensions,
            payload_indexes: vec![
                PayloadIndex {
                    field_name: "id".to_string(),
                },
                PayloadIndex {
                    field_name: "gloss".to_string(),
                },
            ],
        }
    }
}
