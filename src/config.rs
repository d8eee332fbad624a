use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_API_PORT: u16 = 8080;
const DEFAULT_STOREFRONT_PORT: u16 = 8081;
const DEFAULT_BACKOFFICE_PORT: u16 = 8082;

/// Value the ERP ships as a placeholder; treated the same as "no key".
pub const DOLIBARR_KEY_PLACEHOLDER: &str = "your_dolibarr_api_key";

/// Application configuration shared by the facade, storefront, and back office.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    /// ERP database host
    pub db_host: String,
    /// ERP database port
    pub db_port: u16,
    /// ERP database user
    pub db_user: String,
    /// ERP database password
    pub db_password: String,
    /// ERP database name
    #[validate(length(min = 1))]
    pub db_name: String,

    /// Base URL of the Dolibarr HTTP API
    #[validate(length(min = 1))]
    pub dolibarr_api_url: String,
    /// Dolibarr API key (DOLAPIKEY header); placeholder value disables the header
    pub dolibarr_api_key: String,

    /// Base URL of the REST facade, used by the storefront and back office
    #[validate(length(min = 1))]
    pub api_url: String,

    /// Bind address for all services
    pub host: String,
    /// REST facade port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Storefront port
    #[serde(default = "default_storefront_port")]
    pub storefront_port: u16,
    /// Back office port
    #[serde(default = "default_backoffice_port")]
    pub backoffice_port: u16,

    /// Application environment
    #[validate(custom = "validate_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Operator account for the admin sections
    pub admin_username: String,
    pub admin_password: String,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,
    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Timeout for outbound HTTP calls (ERP API, facade) in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// CORS: comma-separated list of allowed origins; unset means permissive
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}
fn default_storefront_port() -> u16 {
    DEFAULT_STOREFRONT_PORT
}
fn default_backoffice_port() -> u16 {
    DEFAULT_BACKOFFICE_PORT
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}
fn default_db_acquire_timeout_secs() -> u64 {
    8
}
fn default_http_timeout_secs() -> u64 {
    10
}

fn validate_environment(environment: &str) -> Result<(), ValidationError> {
    match environment {
        "development" | "test" | "staging" | "production" => Ok(()),
        _ => Err(ValidationError::new("invalid_environment")),
    }
}

impl AppConfig {
    /// Assembles the MySQL connection URL from the DB_* parts.
    pub fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    /// Dolibarr API key, or `None` when unset or still the placeholder.
    pub fn dolibarr_key(&self) -> Option<&str> {
        let key = self.dolibarr_api_key.trim();
        if key.is_empty() || key == DOLIBARR_KEY_PLACEHOLDER {
            None
        } else {
            Some(key)
        }
    }

    /// Constant-shape comparison against the configured operator account.
    pub fn operator_credentials_match(&self, username: &str, password: &str) -> bool {
        username == self.admin_username && password == self.admin_password
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration load error: {0}")]
    Load(#[from] ConfigError),
    #[error("Configuration validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("verger_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

/// Compose-style environment variables that override everything else when set.
const COMPOSE_OVERRIDES: [(&str, &str); 8] = [
    ("DB_HOST", "db_host"),
    ("DB_PORT", "db_port"),
    ("DB_USER", "db_user"),
    ("DB_PASSWORD", "db_password"),
    ("DB_NAME", "db_name"),
    ("DOLIBARR_API_URL", "dolibarr_api_url"),
    ("DOLIBARR_API_KEY", "dolibarr_api_key"),
    ("API_URL", "api_url"),
];

/// Loads application configuration.
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Optional config files (config/default.toml, config/{env}.toml)
/// 3. Environment variables (APP__*)
/// 4. Compose-style variables (DB_HOST, DOLIBARR_API_URL, API_URL, ...)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let mut builder = Config::builder()
        .set_default("db_host", "db")?
        .set_default("db_port", 3306)?
        .set_default("db_user", "dolibarr")?
        .set_default("db_password", "dolibarrpass")?
        .set_default("db_name", "dolibarr")?
        .set_default("dolibarr_api_url", "http://dolibarr:80")?
        .set_default("dolibarr_api_key", DOLIBARR_KEY_PLACEHOLDER)?
        .set_default("api_url", "http://localhost:8080")?
        .set_default("host", "0.0.0.0")?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("admin_username", "admin")?
        .set_default("admin_password", "admin123")?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"));

    for (var, key) in COMPOSE_OVERRIDES {
        builder = builder.set_override_option(key, env::var(var).ok())?;
    }

    let config = builder.build()?;
    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}
