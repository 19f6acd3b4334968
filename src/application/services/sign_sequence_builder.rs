use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::application::ports::SignMatcher;
use crate::application::services::SignCatalogue;
use crate::domain::{MatchResult, ResolvedSign, SignProvider, SignRecord};

pub const DEFAULT_MATCH_TOP_K: usize = 8;
pub const DEFAULT_SIGN_SCORE: f32 = 0.4;

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct SignSequence {
    pub signs: Vec<ResolvedSign>,
    pub provider: SignProvider,
}

/// Resolves every gloss token to a playable clip. Tokens are substituted, never dropped.
pub struct SignSequenceBuilder {
    matcher: Arc<dyn SignMatcher>,
    catalogue: Arc<SignCatalogue>,
    cdn_base_url: String,
    top_k: usize,
}

impl SignSequenceBuilder {
    pub fn new(
        matcher: Arc<dyn SignMatcher>,
        catalogue: Arc<SignCatalogue>,
        cdn_base_url: String,
        top_k: usize,
    ) -> Self {
        Self {
            matcher,
            catalogue,
            cdn_base_url,
            top_k,
        }
    }

    #[tracing::instrument(skip(self, gloss_sequence, keywords), fields(tokens = gloss_sequence.len()))]
    pub async fn build(&self, gloss_sequence: &[String], keywords: &[String]) -> SignSequence {
        let query = combined_query(keywords, gloss_sequence);

        let matches = match self.matcher.search(&query, self.top_k).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Sign search failed, resolving from catalogue only");
                Vec::new()
            }
        };

        let mut by_gloss: HashMap<&str, &MatchResult> = HashMap::with_capacity(matches.len());
        for m in &matches {
            by_gloss.entry(m.gloss.as_str()).or_insert(m);
        }

        let signs = gloss_sequence
            .iter()
            .map(|token| {
                let found = by_gloss
                    .get(token.as_str())
                    .or_else(|| by_gloss.get(token.to_uppercase().as_str()));

                match found {
                    Some(m) => self.from_match(token, m),
                    None => self.from_catalogue(token),
                }
            })
            .collect();

        let provider = if by_gloss.is_empty() {
            SignProvider::Fallback
        } else {
            SignProvider::Qdrant
        };

        SignSequence { signs, provider }
    }

    fn from_match(&self, token: &str, m: &MatchResult) -> ResolvedSign {
        ResolvedSign {
            gloss: m.gloss.clone(),
            requested_gloss: token.to_string(),
            score: m.score,
            video_url: resolve_asset_url(&m.video_file, &self.cdn_base_url),
            thumbnail_url: resolve_asset_url(&m.thumbnail, &self.cdn_base_url),
            duration_ms: m.duration_ms,
        }
    }

    fn from_catalogue(&self, token: &str) -> ResolvedSign {
        let record = match self.catalogue.get_by_gloss(token) {
            Some(record) => record,
            None => {
                let fallback = self.catalogue.default_sign();
                tracing::warn!(
                    requested_gloss = %token,
                    gloss = %fallback.gloss,
                    "No sign found, substituting default"
                );
                fallback
            }
        };
        self.from_record(token, record)
    }

    fn from_record(&self, token: &str, record: &SignRecord) -> ResolvedSign {
        ResolvedSign {
            gloss: record.gloss.clone(),
            requested_gloss: token.to_string(),
            score: DEFAULT_SIGN_SCORE,
            video_url: resolve_asset_url(&record.video_file, &self.cdn_base_url),
            thumbnail_url: resolve_asset_url(&record.thumbnail, &self.cdn_base_url),
            duration_ms: record.duration_ms,
        }
    }
}

/// keywords followed by lowercased glosses, first occurrence kept
pub fn combined_query(keywords: &[String], gloss_sequence: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .cloned()
        .chain(gloss_sequence.iter().map(|g| g.to_lowercase()))
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Absolute URLs pass through; anything else is joined onto the CDN base.
pub fn resolve_asset_url(file: &str, cdn_base_url: &str) -> String {
    if URL_SCHEME.is_match(file) {
        return file.to_string();
    }
    format!(
        "{}/{}",
        cdn_base_url.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}
