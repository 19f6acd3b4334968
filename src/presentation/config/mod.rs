mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CloudSettings, LoggingSettings, QdrantSettings, ServerSettings, Settings, SettingsError,
    SignSettings, TranscriptionSettings,
};
