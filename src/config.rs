//! Configuration System
//!
//! Loads configuration from a TOML file with `MINDMENTOR_*` environment
//! variable overrides, and sets up logging from the `[logging]` section.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub users: UsersConfig,

    #[serde(default)]
    pub curation: CurationConfig,

    #[serde(default)]
    pub websocket: WebSocketConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where study data lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("mindmentor").to_string_lossy().to_string())
        .unwrap_or_else(|| "./mindmentor_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Largest accepted PDF upload
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Identity used when a request carries no `X-User-Id`
#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    #[serde(default = "default_user_id")]
    pub default_user_id: String,

    #[serde(default = "default_user_name")]
    pub default_name: String,

    #[serde(default)]
    pub default_email: String,
}

fn default_user_id() -> String {
    "default".to_string()
}

fn default_user_name() -> String {
    "Student".to_string()
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
            default_name: default_user_name(),
            default_email: String::new(),
        }
    }
}

/// Rate limits for resource curation and plan generation
#[derive(Debug, Clone, Deserialize)]
pub struct CurationConfig {
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: usize,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,
}

fn default_rate_limit_requests() -> usize {
    5
}

fn default_rate_limit_window() -> u64 {
    3600
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            rate_limit_requests: default_rate_limit_requests(),
            rate_limit_window_secs: default_rate_limit_window(),
        }
    }
}

impl CurationConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

fn default_max_connections() -> usize {
    1000
}

fn default_broadcast_capacity() -> usize {
    1024
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

/// Settings for the HTTP client and CLI
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sent as `X-User-Id`; the server default applies when unset
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_id: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over `level` when set. Calling this twice is a no-op.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("mindmentor={},tower_http=info", self.level))
        });

        let registry = tracing_subscriber::registry().with(filter);
        let result = if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).try_init()
        } else {
            registry.with(tracing_subscriber::fmt::layer()).try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate config file locations, in search order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var("MINDMENTOR_CONFIG") {
            paths.push(PathBuf::from(path));
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("mindmentor").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/mindmentor/config.toml"));
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// Load from the first existing search path, else from the environment
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("MINDMENTOR_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = var("MINDMENTOR_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("MINDMENTOR_API_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }

        if let Some(user) = var("MINDMENTOR_DEFAULT_USER") {
            self.users.default_user_id = user;
        }

        if let Some(n) = var("MINDMENTOR_RATE_LIMIT").and_then(|n| n.parse().ok()) {
            self.curation.rate_limit_requests = n;
        }

        if let Some(url) = var("MINDMENTOR_API_URL") {
            self.client.api_url = url;
        }
        if let Some(user) = var("MINDMENTOR_USER_ID") {
            self.client.user_id = Some(user);
        }

        if let Some(level) = var("MINDMENTOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MINDMENTOR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MindMentor Configuration
#
# Environment variables override these settings:
# - MINDMENTOR_CONFIG (path to this file)
# - MINDMENTOR_DATA_DIR
# - MINDMENTOR_API_HOST
# - MINDMENTOR_API_PORT
# - MINDMENTOR_DEFAULT_USER
# - MINDMENTOR_RATE_LIMIT
# - MINDMENTOR_API_URL
# - MINDMENTOR_USER_ID
# - MINDMENTOR_LOG_LEVEL
# - MINDMENTOR_LOG_FORMAT

[storage]
# Directory for the database and uploaded PDFs
data_dir = "~/.local/share/mindmentor"

[api]
host = "0.0.0.0"
port = 8080

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

# Request timeout in seconds
request_timeout_secs = 30

# Largest accepted PDF upload (bytes)
max_upload_bytes = 10485760

[users]
# Used when a request has no X-User-Id header
default_user_id = "default"
default_name = "Student"
default_email = ""

[curation]
# Resource curation and plan generation requests allowed per user per window
rate_limit_requests = 5
rate_limit_window_secs = 3600

[websocket]
max_connections = 1000
broadcast_capacity = 1024

[client]
# Server the CLI talks to
api_url = "http://localhost:8080"
# user_id = "alice"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
