use std::fmt;

use serde::Serialize;

/// Which matcher tier produced the sign matches for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignProvider {
    Qdrant,
    Fallback,
}

impl SignProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignProvider::Qdrant => "qdrant",
            SignProvider::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SignProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSign {
    pub gloss: String,
    pub requested_gloss: String,
    pub score: f32,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_ms: u32,
}

impl ResolvedSign {
    pub fn was_substituted(&self) -> bool {
        self.gloss != self.requested_gloss.to_uppercase()
    }
}
