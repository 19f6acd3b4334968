mod capture_controller;
mod catalogue_seeder;
mod fallback_sign_matcher;
mod interpretation_pipeline;
mod local_sign_matcher;
mod sign_catalogue;
mod sign_sequence_builder;
mod simplification_service;
pub mod text_normalizer;
mod transcription_service;
mod vector_sign_matcher;

pub use capture_controller::{CaptureController, CaptureState, CaptureTransitionError};
pub use catalogue_seeder::seed_catalogue;
pub use fallback_sign_matcher::FallbackSignMatcher;
pub use interpretation_pipeline::{
    Interpretation, InterpretationError, InterpretationPipeline, StageProviders,
};
pub use local_sign_matcher::{LocalSignMatcher, score_record};
pub use sign_catalogue::{CatalogueError, DEFAULT_SIGN_GLOSS, SignCatalogue};
pub use sign_sequence_builder::{
    DEFAULT_MATCH_TOP_K, DEFAULT_SIGN_SCORE, SignSequence, SignSequenceBuilder, combined_query,
    resolve_asset_url,
};
pub use simplification_service::{
    ModelSimplification, SimplificationError, SimplificationParseError, SimplificationService,
    build_prompt, parse_model_output,
};
pub use text_normalizer::{DEFAULT_KEYWORD_LIMIT, extract_keywords, normalize};
pub use transcription_service::{
    CLOUD_CONFIDENCE, DEFAULT_MOCK_TRANSCRIPT, LOCAL_DEFAULT_CONFIDENCE, MOCK_CONFIDENCE,
    TranscriptionService, TranscriptionServiceError,
};
pub use vector_sign_matcher::VectorSignMatcher;
