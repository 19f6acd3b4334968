use std::sync::Arc;

use crate::application::services::InterpretationPipeline;
use crate::infrastructure::stt::LocalSttClient;

/// Which optional backends this process was started with.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendFlags {
    pub cloud_configured: bool,
    pub vector_search_configured: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<InterpretationPipeline>,
    pub local_stt: Option<Arc<LocalSttClient>>,
    pub backends: BackendFlags,
}
