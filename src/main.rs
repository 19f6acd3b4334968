use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use signstream::application::ports::{Embedder, LlmClient, SignMatcher, TranscriptionEngine};
use signstream::application::services::{
    FallbackSignMatcher, InterpretationPipeline, LocalSignMatcher, SignCatalogue,
    SignSequenceBuilder, SimplificationService, TranscriptionService, VectorSignMatcher,
    seed_catalogue,
};
use signstream::infrastructure::catalogue::{BUILTIN_CATALOGUE, load_catalogue_file, parse_catalogue};
use signstream::infrastructure::embedding::PlaceholderEmbedder;
use signstream::infrastructure::llm::GeminiClient;
use signstream::infrastructure::observability::{TracingConfig, init_tracing};
use signstream::infrastructure::persistence::QdrantAdapter;
use signstream::infrastructure::stt::LocalSttClient;
use signstream::presentation::{AppState, BackendFlags, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let embedder: Arc<dyn Embedder> =
        Arc::new(PlaceholderEmbedder::new(settings.signs.embedding_dimension));

    let records = match settings.signs.catalogue_path() {
        Some(path) => load_catalogue_file(&path, embedder.as_ref())?,
        None => parse_catalogue(BUILTIN_CATALOGUE, embedder.as_ref())?,
    };
    let catalogue = Arc::new(
        SignCatalogue::new(records, &settings.signs.default_gloss)
            .context("invalid sign catalogue")?,
    );

    let remote_matcher: Option<Arc<dyn SignMatcher>> = match settings.qdrant.url() {
        Some(url) => {
            let adapter = Arc::new(QdrantAdapter::new(
                url,
                settings.qdrant.collection_name.clone(),
            )?);
            if settings.qdrant.seed_on_startup {
                let seeded =
                    seed_catalogue(adapter.as_ref(), &catalogue, embedder.dimensions()).await;
                if let Err(e) = seeded {
                    // search falls back to the local matcher
                    tracing::warn!(error = %e, collection = %adapter.collection_name(), "Sign collection seeding failed");
                }
            }
            tracing::info!(url, collection = %settings.qdrant.collection_name, "Vector sign search enabled");
            Some(Arc::new(VectorSignMatcher::new(adapter, Arc::clone(&embedder))))
        }
        None => {
            tracing::info!("Vector sign search not configured, using local matcher only");
            None
        }
    };
    let backends = BackendFlags {
        cloud_configured: settings.cloud.api_key().is_some(),
        vector_search_configured: remote_matcher.is_some(),
    };

    let matcher = Arc::new(FallbackSignMatcher::new(
        remote_matcher,
        LocalSignMatcher::new(Arc::clone(&catalogue), Arc::clone(&embedder)),
    ));

    let gemini = settings.cloud.api_key().map(|key| {
        Arc::new(GeminiClient::new(
            key.to_string(),
            Some(settings.cloud.base_url.clone()),
            Some(settings.cloud.model.clone()),
        ))
    });

    let local_stt = settings.transcription.local_stt_enabled.then(|| {
        Arc::new(LocalSttClient::new(
            &settings.transcription.local_stt_url,
            settings.transcription.fallback_locale.clone(),
            settings.transcription.local_timeout(),
        ))
    });

    let transcription = Arc::new(TranscriptionService::new(
        local_stt
            .clone()
            .map(|c| c as Arc<dyn TranscriptionEngine>),
        gemini.clone().map(|c| c as Arc<dyn TranscriptionEngine>),
        settings.transcription.local_timeout(),
        settings.transcription.fallback_locale.clone(),
        settings.transcription.mock_transcript.clone(),
    ));
    let simplification = Arc::new(SimplificationService::new(
        gemini.map(|c| c as Arc<dyn LlmClient>),
        settings.signs.keyword_limit,
    ));
    let sign_builder = Arc::new(SignSequenceBuilder::new(
        matcher,
        Arc::clone(&catalogue),
        settings.signs.cdn_base_url.clone(),
        settings.signs.top_k,
    ));

    let state = AppState {
        pipeline: Arc::new(InterpretationPipeline::new(
            transcription,
            simplification,
            sign_builder,
        )),
        local_stt,
        backends,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(
        %addr,
        environment = %environment,
        signs = catalogue.len(),
        cloud = backends.cloud_configured,
        local_stt = settings.transcription.local_stt_enabled,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
