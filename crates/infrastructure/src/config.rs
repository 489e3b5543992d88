//! Application configuration
//!
//! Loaded from an optional `config.toml` with environment variable
//! overrides (e.g. `TALKSCRIBE_SERVER_PORT`).

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Maximum size of an audio upload in bytes (default: 10MB)
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_max_upload() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(30),
            log_format: default_log_format(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Object storage configuration (S3 or any S3-compatible service)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket that holds uploaded audio
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Region (e.g. "eu-central-1")
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible services such as MinIO
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key; falls back to the standard environment variables when unset
    #[serde(default)]
    pub access_key: Option<String>,

    /// Secret key; falls back to the standard environment variables when unset
    #[serde(default)]
    pub secret_key: Option<String>,
}

fn default_bucket() -> String {
    "talkscribe-audio".to_string()
}

fn default_region() -> String {
    "eu-central-1".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
        }
    }
}

/// Speech provider configuration (detection, synthesis, transcription)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechProviderConfig {
    /// Base URL of the speech provider API
    #[serde(default = "default_speech_base_url")]
    pub base_url: String,

    /// API key sent as a bearer token, if the provider requires one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_speech_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_speech_base_url() -> String {
    "http://localhost:9090".to_string()
}

const fn default_speech_timeout_ms() -> u64 {
    30_000
}

impl Default for SpeechProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_speech_base_url(),
            api_key: None,
            timeout_ms: default_speech_timeout_ms(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Enable per-client rate limiting
    #[serde(default = "default_true")]
    pub rate_limit_enabled: bool,

    /// Requests allowed per client per window
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,

    /// Rate limit window in seconds
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,
}

const fn default_rate_limit_max() -> u32 {
    10
}

const fn default_rate_limit_window() -> u64 {
    300
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            rate_limit_enabled: true,
            rate_limit_max_requests: default_rate_limit_max(),
            rate_limit_window_secs: default_rate_limit_window(),
        }
    }
}

/// Cleanup sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Seconds between cleanup sweeps (default: hourly)
    #[serde(default = "default_cleanup_interval")]
    pub interval_secs: u64,
}

const fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_cleanup_interval(),
        }
    }
}

/// Text-to-speech retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Attempts per synthesis request, including the first
    #[serde(default = "default_tts_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_tts_delay_ms")]
    pub retry_delay_ms: u64,
}

const fn default_tts_attempts() -> u32 {
    3
}

const fn default_tts_delay_ms() -> u64 {
    1000
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_tts_attempts(),
            retry_delay_ms: default_tts_delay_ms(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Object storage for uploaded audio
    #[serde(default)]
    pub storage: StorageConfig,

    /// Speech provider endpoints
    #[serde(default)]
    pub speech: SpeechProviderConfig,

    /// Rate limiting
    #[serde(default)]
    pub security: SecurityConfig,

    /// Cleanup sweep
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Text-to-speech retries
    #[serde(default)]
    pub tts: TtsConfig,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// Reads `config.toml` from the working directory when present, then
    /// applies `TALKSCRIBE_*` environment variables on top
    /// (e.g. `TALKSCRIBE_SERVER_PORT=9000`).
    ///
    /// # Errors
    ///
    /// Returns an error when a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("TALKSCRIBE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
