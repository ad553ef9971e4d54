use serde::{Deserialize, Serialize};

/// Build-time application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub snackbar_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Empty base URL = same origin, requests go to relative /api/... paths
            backend_url_development: String::new(),
            backend_url_production: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            snackbar_duration_ms: 3000,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("YOGA_BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("YOGA_BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("YOGA_ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("YOGA_ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: option_env!("YOGA_LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            snackbar_duration_ms: option_env!("YOGA_SNACKBAR_DURATION_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.snackbar_duration_ms),
        }
    }

    /// Backend base URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Effective log filter; `Off` when logging is disabled, `Info` on an unknown level name.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        if !self.enable_logging {
            return log::LevelFilter::Off;
        }
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
