use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
    #[serde(default)]
    pub media: MediaSettings,
    #[serde(default)]
    pub whisper: WhisperSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layered configuration: optional `appsettings.<env>.toml` overridden by
    /// `APP_*` environment variables (e.g. `APP_SERVER__PORT`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_uploads_dir")]
    pub directory: PathBuf,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            directory: default_uploads_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    #[serde(default = "default_ffmpeg_binary")]
    pub ffmpeg_binary: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: default_ffmpeg_binary(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperSettings {
    /// Accuracy tier ("base", "small", "medium", "large") or a full
    /// Hugging Face repo id.
    #[serde(default = "default_whisper_model")]
    pub model: String,
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model: default_whisper_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            max_tokens: default_llm_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_directive")]
    pub directive: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directive: default_log_directive(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_ffmpeg_binary() -> String {
    "ffmpeg".to_string()
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_temperature() -> f32 {
    0.3
}

fn default_llm_max_tokens() -> usize {
    1024
}

fn default_log_directive() -> String {
    "info,lectern=debug,tower_http=debug".to_string()
}
