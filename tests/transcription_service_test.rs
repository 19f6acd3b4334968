mod helpers;

use std::sync::Arc;
use std::time::Duration;

use signstream::application::ports::{EngineTranscript, TranscriptionEngine};
use signstream::application::services::{
    CLOUD_CONFIDENCE, DEFAULT_MOCK_TRANSCRIPT, LOCAL_DEFAULT_CONFIDENCE, MOCK_CONFIDENCE,
    TranscriptionService, TranscriptionServiceError,
};
use signstream::domain::{AudioChunk, TranscriptionProvider};

use helpers::{FakeEngine, audio_chunk};

fn service(
    local: Option<Arc<FakeEngine>>,
    cloud: Option<Arc<FakeEngine>>,
    local_timeout: Duration,
) -> TranscriptionService {
    TranscriptionService::new(
        local.map(|e| e as Arc<dyn TranscriptionEngine>),
        cloud.map(|e| e as Arc<dyn TranscriptionEngine>),
        local_timeout,
        "en-US".to_string(),
        DEFAULT_MOCK_TRANSCRIPT.to_string(),
    )
}

#[tokio::test]
async fn given_empty_audio_when_transcribing_then_returns_missing_audio() {
    let service = service(None, None, Duration::from_secs(1));
    let chunk = AudioChunk::new(Vec::new(), "audio/webm", None);

    let result = service.transcribe(&chunk).await;

    assert!(matches!(result, Err(TranscriptionServiceError::MissingAudio)));
}

#[tokio::test]
async fn given_local_endpoint_succeeds_when_transcribing_then_skips_cloud() {
    let local = FakeEngine::with_transcript(EngineTranscript {
        text: "  good morning team ".to_string(),
        locale: Some("en-GB".to_string()),
        confidence: Some(0.72),
    });
    let cloud = FakeEngine::succeeding("cloud text");
    let service = service(
        Some(Arc::clone(&local)),
        Some(Arc::clone(&cloud)),
        Duration::from_secs(1),
    );

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.text, "good morning team");
    assert_eq!(result.locale, "en-GB");
    assert_eq!(result.confidence, 0.72);
    assert_eq!(result.provider, TranscriptionProvider::Local);
    assert_eq!(local.call_count(), 1);
    assert_eq!(cloud.call_count(), 0);
}

#[tokio::test]
async fn given_local_reply_without_confidence_when_transcribing_then_uses_defaults() {
    let local = FakeEngine::succeeding("hello");
    let service = service(Some(local), None, Duration::from_secs(1));
    let chunk = AudioChunk::new(b"bytes".to_vec(), "audio/webm", None);

    let result = service.transcribe(&chunk).await.unwrap();

    assert_eq!(result.confidence, LOCAL_DEFAULT_CONFIDENCE);
    assert_eq!(result.locale, "en-US");
}

#[tokio::test]
async fn given_out_of_range_local_confidence_when_transcribing_then_clamps_it() {
    let local = FakeEngine::with_transcript(EngineTranscript {
        text: "hello".to_string(),
        locale: None,
        confidence: Some(3.5),
    });
    let service = service(Some(local), None, Duration::from_secs(1));

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.confidence, 1.0);
}

#[tokio::test]
async fn given_local_endpoint_times_out_when_transcribing_then_uses_cloud() {
    let local = FakeEngine::hanging(Duration::from_secs(5));
    let cloud = FakeEngine::succeeding("from the cloud");
    let service = service(
        Some(local),
        Some(Arc::clone(&cloud)),
        Duration::from_millis(50),
    );

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.text, "from the cloud");
    assert_eq!(result.provider, TranscriptionProvider::Cloud);
    assert_eq!(result.confidence, CLOUD_CONFIDENCE);
    assert_eq!(cloud.call_count(), 1);
}

#[tokio::test]
async fn given_local_returns_blank_text_when_transcribing_then_falls_through() {
    let local = FakeEngine::succeeding("   ");
    let cloud = FakeEngine::succeeding("real words");
    let service = service(Some(local), Some(cloud), Duration::from_secs(1));

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.provider, TranscriptionProvider::Cloud);
    assert_eq!(result.text, "real words");
}

#[tokio::test]
async fn given_local_fails_and_no_cloud_when_transcribing_then_returns_mock() {
    let local = FakeEngine::failing();
    let service = service(Some(Arc::clone(&local)), None, Duration::from_secs(1));

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.text, DEFAULT_MOCK_TRANSCRIPT);
    assert_eq!(result.provider, TranscriptionProvider::Mock);
    assert_eq!(result.confidence, MOCK_CONFIDENCE);
    assert_eq!(local.call_count(), 1);
}

#[tokio::test]
async fn given_every_tier_fails_when_transcribing_then_each_runs_once_then_mock() {
    let local = FakeEngine::failing();
    let cloud = FakeEngine::failing();
    let service = service(
        Some(Arc::clone(&local)),
        Some(Arc::clone(&cloud)),
        Duration::from_secs(1),
    );

    let result = service.transcribe(&audio_chunk()).await.unwrap();

    assert_eq!(result.provider, TranscriptionProvider::Mock);
    assert_eq!(result.locale, "en-US");
    assert_eq!(local.call_count(), 1);
    assert_eq!(cloud.call_count(), 1);
}

#[tokio::test]
async fn given_no_backends_when_transcribing_then_returns_mock_with_request_locale() {
    let service = service(None, None, Duration::from_secs(1));
    let chunk = AudioChunk::new(b"bytes".to_vec(), "audio/ogg", Some("fr-FR".to_string()));

    let result = service.transcribe(&chunk).await.unwrap();

    assert_eq!(result.provider, TranscriptionProvider::Mock);
    assert_eq!(result.locale, "fr-FR");
}
