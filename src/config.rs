use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 8;
const DEFAULT_DB_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_LOCK_WAIT_SECS: u64 = 5;

/// Accounting policy switches. Both defaults preserve the behavior observed
/// in the system this engine replaces; see DESIGN.md before changing them.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StockPolicyConfig {
    /// Permit egress movements to drive a balance negative (no
    /// stock-sufficiency check). When false the accumulator rejects the
    /// batch with `InsufficientStock`.
    #[serde(default = "default_allow_negative_stock")]
    pub allow_negative_stock: bool,

    /// Bound on the row-lock wait inside a line batch, in seconds (1-300).
    /// Exceeding it surfaces `LockTimeout` and rolls the batch back.
    #[serde(default = "default_lock_wait_secs")]
    #[validate(range(min = 1, max = 300))]
    pub lock_wait_secs: u64,
}

impl Default for StockPolicyConfig {
    fn default() -> Self {
        Self {
            allow_negative_stock: default_allow_negative_stock(),
            lock_wait_secs: default_lock_wait_secs(),
        }
    }
}

/// Resolved policy handed to the stock accumulator.
#[derive(Clone, Copy, Debug)]
pub struct StockPolicy {
    pub allow_negative_stock: bool,
    pub lock_wait: Duration,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicyConfig::default().policy()
    }
}

impl StockPolicyConfig {
    pub fn policy(&self) -> StockPolicy {
        StockPolicy {
            allow_negative_stock: self.allow_negative_stock,
            lock_wait: Duration::from_secs(self.lock_wait_secs),
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    #[validate(length(min = 1))]
    pub database_url: String,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,

    /// Maximum database connections
    #[serde(default = "default_db_max_connections")]
    #[validate(range(min = 1, max = 1024))]
    pub db_max_connections: u32,

    /// Minimum database connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// Database connect timeout in seconds
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,

    /// Database acquire timeout in seconds
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Database idle timeout in seconds
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,

    /// Optional statement timeout in seconds
    #[serde(default)]
    pub db_statement_timeout_secs: Option<u64>,

    /// Stock accounting policy
    #[serde(default)]
    #[validate]
    pub stock: StockPolicyConfig,
}

impl AppConfig {
    /// Programmatic constructor used by tests and embedders; everything but
    /// the database URL takes its default.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: false,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            db_statement_timeout_secs: None,
            stock: StockPolicyConfig::default(),
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Resolved stock policy for service construction.
    pub fn stock_policy(&self) -> StockPolicy {
        self.stock.policy()
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_db_max_connections() -> u32 {
    DEFAULT_DB_MAX_CONNECTIONS
}

fn default_db_min_connections() -> u32 {
    DEFAULT_DB_MIN_CONNECTIONS
}

fn default_db_connect_timeout_secs() -> u64 {
    DEFAULT_DB_CONNECT_TIMEOUT_SECS
}

fn default_db_acquire_timeout_secs() -> u64 {
    DEFAULT_DB_ACQUIRE_TIMEOUT_SECS
}

fn default_db_idle_timeout_secs() -> u64 {
    DEFAULT_DB_IDLE_TIMEOUT_SECS
}

fn default_allow_negative_stock() -> bool {
    true
}

fn default_lock_wait_secs() -> u64 {
    DEFAULT_LOCK_WAIT_SECS
}

/// Loads configuration from `config/default.toml`, `config/{env}.toml` and
/// `APP__`-prefixed environment variables, in that order of precedence.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting the config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    let default_path = Path::new(CONFIG_DIR).join("default");
    let env_path = Path::new(CONFIG_DIR).join(&run_env);

    let cfg = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    app_config.validate()?;

    Ok(app_config)
}

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// configured level; repeated calls are no-ops so tests can share it.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let default_directive = format!("kardex_core={level}");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
