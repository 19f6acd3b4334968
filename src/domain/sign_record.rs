use std::collections::BTreeSet;

use super::Embedding;

/// One entry of the sign catalogue. Immutable once the catalogue is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SignRecord {
    pub id: String,
    pub gloss: String,
    pub keywords: BTreeSet<String>,
    pub topics: BTreeSet<String>,
    pub embedding: Embedding,
    pub video_file: String,
    pub thumbnail: String,
    pub duration_ms: u32,
}

impl SignRecord {
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }
}
