mod audio_chunk;
mod capture_status;
mod embedding;
mod match_result;
mod resolved_sign;
mod sign_record;
mod simplification;
mod transcription;

pub use audio_chunk::AudioChunk;
pub use capture_status::CaptureStatus;
pub use embedding::Embedding;
pub use match_result::MatchResult;
pub use resolved_sign::{ResolvedSign, SignProvider};
pub use sign_record::SignRecord;
pub use simplification::{SimplificationProvider, SimplificationResult};
pub use transcription::{TranscriptionProvider, TranscriptionResult};
