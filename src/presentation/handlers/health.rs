use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub backends: BackendHealth,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendHealth {
    pub local_stt: &'static str,
    pub cloud: &'static str,
    pub vector_search: &'static str,
}

fn configured(flag: bool) -> &'static str {
    if flag { "configured" } else { "disabled" }
}

/// Always `200`: the pipeline degrades to local tiers, so a missing backend is not unhealthy.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let local_stt = match &state.local_stt {
        None => "disabled",
        Some(client) => match client.health().await {
            Ok(health) if health.ready => "ready",
            Ok(_) => "degraded",
            Err(e) => {
                tracing::debug!(error = %e, "Local speech endpoint health check failed");
                "unreachable"
            }
        },
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            backends: BackendHealth {
                local_stt,
                cloud: configured(state.backends.cloud_configured),
                vector_search: configured(state.backends.vector_search_configured),
            },
        }),
    )
}
