//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted interview model endpoint
    #[serde(default)]
    pub model: ModelConfig,

    /// Speech services (transcription + synthesis)
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Media conversion (ffmpeg)
    #[serde(default)]
    pub media: MediaConfig,

    /// Synthesized audio artifact storage
    #[serde(default)]
    pub audio: AudioConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to restrict CORS to `cors_origins`
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; empty defaults to localhost:3000
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    5001
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Hosted interview model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the hosted model
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,

    /// Operation name for starting an interview
    #[serde(default = "default_start_op")]
    pub start_op: String,

    /// Operation name for continuing an interview
    #[serde(default = "default_continue_op")]
    pub continue_op: String,

    /// Per-call timeout in seconds (model calls can take a while)
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// Timeout for the startup connection probe in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_model_endpoint() -> String {
    "http://127.0.0.1:7860".to_string()
}

fn default_start_op() -> String {
    "gradio_start_interview".to_string()
}

fn default_continue_op() -> String {
    "gradio_handle_response".to_string()
}

fn default_model_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            start_op: default_start_op(),
            continue_op: default_continue_op(),
            timeout_secs: default_model_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Speech service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the transcription service
    #[serde(default = "default_stt_url")]
    pub stt_url: String,

    /// Transcription request timeout in seconds
    #[serde(default = "default_speech_timeout")]
    pub stt_timeout_secs: u64,

    /// Base URL of the synthesis engine
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Voice/language code passed to the synthesis engine
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// Synthesis request timeout in seconds
    #[serde(default = "default_speech_timeout")]
    pub tts_timeout_secs: u64,
}

fn default_stt_url() -> String {
    "http://127.0.0.1:8091".to_string()
}

fn default_tts_url() -> String {
    "http://127.0.0.1:8092".to_string()
}

fn default_tts_voice() -> String {
    "en".to_string()
}

fn default_speech_timeout() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_url: default_stt_url(),
            stt_timeout_secs: default_speech_timeout(),
            tts_url: default_tts_url(),
            tts_voice: default_tts_voice(),
            tts_timeout_secs: default_speech_timeout(),
        }
    }
}

/// Media conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// ffmpeg binary; resolved via PATH when not absolute
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Canonical waveform sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Subprocess timeout in milliseconds
    #[serde(default = "default_media_timeout_ms")]
    pub timeout_ms: u64,

    /// Scratch directory for conversion temp files; system temp when unset
    #[serde(default)]
    pub work_dir: Option<String>,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_media_timeout_ms() -> u64 {
    30_000
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            sample_rate: default_sample_rate(),
            timeout_ms: default_media_timeout_ms(),
            work_dir: None,
        }
    }
}

/// Synthesized audio artifact storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Directory artifacts are written to (served statically)
    #[serde(default = "default_audio_dir")]
    pub dir: String,

    /// Public URL prefix the artifacts are served under
    #[serde(default = "default_audio_base")]
    pub public_base: String,
}

fn default_audio_dir() -> String {
    "static/audio".to_string()
}

fn default_audio_base() -> String {
    "/static/audio".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            dir: default_audio_dir(),
            public_base: default_audio_base(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings at startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        for (name, value) in [
            ("model.endpoint", &self.model.endpoint),
            ("speech.stt_url", &self.speech.stt_url),
            ("speech.tts_url", &self.speech.tts_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        if self.model.timeout_secs == 0 || self.media.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "upstream timeouts must be non-zero".into(),
            ));
        }
        if self.audio.dir.trim().is_empty() {
            return Err(ConfigError::Invalid("audio.dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env}")).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("AI_INTERVIEWER").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.media.sample_rate, 16_000);
        assert!(settings.server.cors_enabled);
        assert!(!settings.environment.is_production());
    }

    #[test]
    fn test_validation_rejects_empty_endpoint() {
        let mut settings = Settings::default();
        settings.model.endpoint = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.media.timeout_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        // Missing sections fall back to defaults
        let settings: Settings =
            serde_json::from_value(serde_json::json!({ "server": { "port": 8080 } })).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.model.start_op, "gradio_start_interview");
        assert_eq!(settings.audio.public_base, "/static/audio");
    }
}
