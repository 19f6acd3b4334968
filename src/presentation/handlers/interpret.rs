use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::AudioChunk;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

const DEFAULT_MIME_TYPE: &str = "audio/webm";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretRequest {
    #[serde(default)]
    pub audio_base64: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

/// Audio wins when both audio and text are supplied.
#[tracing::instrument(skip(state, request))]
pub async fn interpret_handler(
    State(state): State<AppState>,
    Json(request): Json<InterpretRequest>,
) -> impl IntoResponse {
    let audio = request.audio_base64.filter(|a| !a.trim().is_empty());

    let result = match (audio, request.text) {
        (Some(encoded), _) => {
            let data = match STANDARD.decode(encoded.trim()) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected undecodable audio payload");
                    return bad_request(format!("audioBase64 is not valid base64: {}", e));
                }
            };
            let chunk = AudioChunk::new(
                data,
                request
                    .mime_type
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                request.locale,
            );
            state.pipeline.interpret_audio(&chunk).await
        }
        (None, Some(text)) => {
            tracing::debug!(text = %sanitize_prompt(&text), "Interpreting text");
            state.pipeline.interpret_text(&text).await
        }
        (None, None) => {
            return bad_request("either audioBase64 or text is required".to_string());
        }
    };

    match result {
        Ok(interpretation) => (StatusCode::OK, Json(interpretation)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Interpretation request rejected");
            bad_request(e.to_string())
        }
    }
}
