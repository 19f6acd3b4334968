use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;
use crate::application::services::{
    DEFAULT_KEYWORD_LIMIT, DEFAULT_MATCH_TOP_K, DEFAULT_MOCK_TRANSCRIPT, DEFAULT_SIGN_GLOSS,
};
use crate::infrastructure::embedding::DEFAULT_EMBEDDING_DIMENSION;
use crate::infrastructure::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration could not be loaded: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub cloud: CloudSettings,
    pub qdrant: QdrantSettings,
    pub signs: SignSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub local_stt_enabled: bool,
    pub local_stt_url: String,
    pub local_timeout_ms: u64,
    pub fallback_locale: String,
    pub mock_transcript: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            local_stt_enabled: false,
            local_stt_url: "http://127.0.0.1:6000".to_string(),
            local_timeout_ms: 5000,
            fallback_locale: "en-US".to_string(),
            mock_transcript: DEFAULT_MOCK_TRANSCRIPT.to_string(),
        }
    }
}

impl TranscriptionSettings {
    pub fn local_timeout(&self) -> Duration {
        Duration::from_millis(self.local_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl CloudSettings {
    pub fn api_key(&self) -> Option<&str> {
        Some(self.api_key.trim()).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QdrantSettings {
    pub url: String,
    pub collection_name: String,
    pub seed_on_startup: bool,
}

impl Default for QdrantSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            collection_name: "signs".to_string(),
            seed_on_startup: false,
        }
    }
}

impl QdrantSettings {
    pub fn url(&self) -> Option<&str> {
        Some(self.url.trim()).filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignSettings {
    pub cdn_base_url: String,
    pub default_gloss: String,
    pub top_k: usize,
    pub embedding_dimension: usize,
    pub keyword_limit: usize,
    pub catalogue_path: String,
}

impl Default for SignSettings {
    fn default() -> Self {
        Self {
            cdn_base_url: "http://localhost:3000/signs/".to_string(),
            default_gloss: DEFAULT_SIGN_GLOSS.to_string(),
            top_k: DEFAULT_MATCH_TOP_K,
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            catalogue_path: String::new(),
        }
    }
}

impl SignSettings {
    pub fn catalogue_path(&self) -> Option<PathBuf> {
        Some(self.catalogue_path.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Defaults, then `appsettings.{environment}.toml`, then `APP_`-prefixed variables
    /// with `__` between sections (`APP_CLOUD__API_KEY`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field: &'static str, reason: &str| SettingsError::Invalid {
            field,
            reason: reason.to_string(),
        };

        if self.server.port == 0 {
            return Err(invalid("server.port", "must be greater than zero"));
        }
        if self.transcription.local_timeout_ms == 0 {
            return Err(invalid(
                "transcription.local_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.transcription.local_stt_enabled && self.transcription.local_stt_url.trim().is_empty()
        {
            return Err(invalid(
                "transcription.local_stt_url",
                "required when local speech-to-text is enabled",
            ));
        }
        if self.transcription.mock_transcript.trim().is_empty() {
            return Err(invalid("transcription.mock_transcript", "must not be empty"));
        }
        if self.signs.top_k == 0 {
            return Err(invalid("signs.top_k", "must be greater than zero"));
        }
        if self.signs.embedding_dimension == 0 {
            return Err(invalid(
                "signs.embedding_dimension",
                "must be greater than zero",
            ));
        }
        if self.signs.keyword_limit == 0 {
            return Err(invalid("signs.keyword_limit", "must be greater than zero"));
        }
        if self.signs.default_gloss.trim().is_empty() {
            return Err(invalid("signs.default_gloss", "must not be empty"));
        }
        if self.signs.cdn_base_url.trim().is_empty() {
            return Err(invalid("signs.cdn_base_url", "must not be empty"));
        }
        Ok(())
    }
}
