//! Configuration management for the AI interviewer backend
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, then `config/{env}.yaml`)
//! - Environment variables (`AI_INTERVIEWER_` prefix, `__` nesting)
//!
//! Every section has serde defaults so the service starts with no config
//! files at all.

pub mod settings;

pub use settings::{
    load_settings, AudioConfig, MediaConfig, ModelConfig, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings, SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
