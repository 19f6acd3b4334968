#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use signstream::application::ports::{
    CollectionConfig, Embedder, EngineTranscript, LlmClient, LlmClientError, MatcherError,
    SignMatcher, TranscriptionEngine, TranscriptionError, VectorStore, VectorStoreError,
};
use signstream::application::services::{DEFAULT_SIGN_GLOSS, SignCatalogue};
use signstream::domain::{AudioChunk, Embedding, MatchResult, SignRecord};
use signstream::infrastructure::embedding::PlaceholderEmbedder;

pub const TEST_CDN: &str = "https://cdn.example/signs/";

pub fn embedder() -> Arc<dyn Embedder> {
    Arc::new(PlaceholderEmbedder::default())
}

pub fn sign(id: &str, gloss: &str, keywords: &[&str], topics: &[&str]) -> SignRecord {
    let embedder = PlaceholderEmbedder::default();
    SignRecord {
        id: id.to_string(),
        gloss: gloss.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect::<BTreeSet<_>>(),
        topics: topics.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
        embedding: embedder.embed(&keywords.join(" ")),
        video_file: format!("{}.webm", id),
        thumbnail: format!("{}.jpg", id),
        duration_ms: 1500,
    }
}

/// Same as `sign` but with a zero embedding, so the vector term never contributes.
pub fn flat_sign(id: &str, gloss: &str, keywords: &[&str], topics: &[&str]) -> SignRecord {
    SignRecord {
        embedding: Embedding::zeros(PlaceholderEmbedder::default().dimensions()),
        ..sign(id, gloss, keywords, topics)
    }
}

pub fn test_records() -> Vec<SignRecord> {
    vec![
        sign("hello", "HELLO", &["hello", "hi", "greetings"], &["greeting"]),
        sign("everyone", "EVERYONE", &["everyone", "everybody", "team"], &["people"]),
        sign("start", "START", &["start", "begin"], &["action"]),
        sign("meeting", "MEETING", &["meeting", "meet", "session"], &["work"]),
        sign("today", "TODAY", &["today", "now"], &["time"]),
        sign("thank-you", "THANK-YOU", &["thanks", "thank"], &["courtesy"]),
    ]
}

pub fn test_catalogue() -> Arc<SignCatalogue> {
    Arc::new(SignCatalogue::new(test_records(), DEFAULT_SIGN_GLOSS).unwrap())
}

pub fn match_result(id: &str, gloss: &str, score: f32) -> MatchResult {
    MatchResult {
        id: id.to_string(),
        gloss: gloss.to_string(),
        video_file: format!("{}.webm", id),
        thumbnail: format!("{}.jpg", id),
        duration_ms: 1200,
        score,
    }
}

pub fn audio_chunk() -> AudioChunk {
    AudioChunk::new(
        b"fake webm bytes".to_vec(),
        "audio/webm",
        Some("en-US".to_string()),
    )
}

pub enum EngineBehaviour {
    Succeed(EngineTranscript),
    Fail,
    Hang(Duration),
}

pub struct FakeEngine {
    behaviour: EngineBehaviour,
    pub calls: AtomicUsize,
}

impl FakeEngine {
    pub fn succeeding(text: &str) -> Arc<Self> {
        Self::with_transcript(EngineTranscript::text_only(text))
    }

    pub fn with_transcript(transcript: EngineTranscript) -> Arc<Self> {
        Arc::new(Self {
            behaviour: EngineBehaviour::Succeed(transcript),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            behaviour: EngineBehaviour::Fail,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn hanging(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            behaviour: EngineBehaviour::Hang(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for FakeEngine {
    async fn transcribe(&self, _chunk: &AudioChunk) -> Result<EngineTranscript, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            EngineBehaviour::Succeed(transcript) => Ok(transcript.clone()),
            EngineBehaviour::Fail => Err(TranscriptionError::ApiRequestFailed(
                "connection refused".to_string(),
            )),
            EngineBehaviour::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(EngineTranscript::text_only("too late"))
            }
        }
    }
}

pub struct FakeLlm {
    reply: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for FakeLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("HTTP 503: unavailable".to_string()))
    }
}

/// Returns the queued responses in order, one per search call.
pub struct ScriptedVectorStore {
    responses: Mutex<VecDeque<Vec<MatchResult>>>,
    pub searches: AtomicUsize,
    pub created_dimensions: Mutex<Vec<u64>>,
    pub upserted_ids: Mutex<Vec<String>>,
}

impl ScriptedVectorStore {
    pub fn new(responses: Vec<Vec<MatchResult>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            searches: AtomicUsize::new(0),
            created_dimensions: Mutex::new(Vec::new()),
            upserted_ids: Mutex::new(Vec::new()),
        })
    }

    pub fn upserted_ids(&self) -> Vec<String> {
        self.upserted_ids.lock().unwrap().clone()
    }

    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VectorStore for ScriptedVectorStore {
    async fn create_collection(
        &self,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        self.created_dimensions
            .lock()
            .unwrap()
            .push(config.vector_dimensions);
        Ok(true)
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(true)
    }

    async fn upsert_signs(&self, signs: &[SignRecord]) -> Result<(), VectorStoreError> {
        self.upserted_ids
            .lock()
            .unwrap()
            .extend(signs.iter().map(|s| s.id.clone()));
        Ok(())
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        _top_k: usize,
    ) -> Result<Vec<MatchResult>, VectorStoreError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

pub struct UnreachableVectorStore;

#[async_trait::async_trait]
impl VectorStore for UnreachableVectorStore {
    async fn create_collection(
        &self,
        _config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        Err(VectorStoreError::ConnectionFailed(
            "connection refused".to_string(),
        ))
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Err(VectorStoreError::ConnectionFailed(
            "connection refused".to_string(),
        ))
    }

    async fn upsert_signs(&self, _signs: &[SignRecord]) -> Result<(), VectorStoreError> {
        Err(VectorStoreError::ConnectionFailed(
            "connection refused".to_string(),
        ))
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        _top_k: usize,
    ) -> Result<Vec<MatchResult>, VectorStoreError> {
        Err(VectorStoreError::SearchFailed("transport error".to_string()))
    }
}

/// Matcher that always answers with the same ranked list.
pub struct FixedMatcher(pub Vec<MatchResult>);

#[async_trait::async_trait]
impl SignMatcher for FixedMatcher {
    async fn search(
        &self,
        _keywords: &[String],
        top_k: usize,
    ) -> Result<Vec<MatchResult>, MatcherError> {
        Ok(self.0.iter().take(top_k).cloned().collect())
    }
}

pub struct BrokenMatcher;

#[async_trait::async_trait]
impl SignMatcher for BrokenMatcher {
    async fn search(
        &self,
        _keywords: &[String],
        _top_k: usize,
    ) -> Result<Vec<MatchResult>, MatcherError> {
        Err(MatcherError::VectorSearch(VectorStoreError::SearchFailed(
            "transport error".to_string(),
        )))
    }
}

pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}
