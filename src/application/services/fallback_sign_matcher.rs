use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{MatcherError, SignMatcher};
use crate::application::services::LocalSignMatcher;
use crate::domain::MatchResult;

/// Remote matcher when one is configured, local heuristic whenever it is absent or fails.
pub struct FallbackSignMatcher {
    remote: Option<Arc<dyn SignMatcher>>,
    local: LocalSignMatcher,
}

impl FallbackSignMatcher {
    pub fn new(remote: Option<Arc<dyn SignMatcher>>, local: LocalSignMatcher) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl SignMatcher for FallbackSignMatcher {
    async fn search(
        &self,
        keywords: &[String],
        top_k: usize,
    ) -> Result<Vec<MatchResult>, MatcherError> {
        if let Some(remote) = &self.remote {
            match remote.search(keywords, top_k).await {
                Ok(matches) => return Ok(matches),
                Err(e) => {
                    tracing::warn!(
                        tier = "vector",
                        error = %e,
                        keywords = ?keywords,
                        "Remote sign search failed, using local matcher"
                    );
                }
            }
        }

        Ok(self.local.rank(keywords, top_k))
    }
}
