use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::validation::temporal::BusinessCalendar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub calendar: CalendarConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Which repository implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidStorage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub base_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub storage: StorageBackend,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub init_schema: bool,
}

/// Time zones used by the temporal predicates. Weekdays have always been
/// judged in UTC while business hours use the company's local clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub weekday_timezone: String,
    pub business_timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_cors: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown time zone '{name}' for {setting}")]
    InvalidTimezone { setting: &'static str, name: String },

    #[error("Unknown storage backend: {0}")]
    InvalidStorage(String),
}

impl CalendarConfig {
    /// Resolve the configured IANA zone names into a calendar
    pub fn business_calendar(&self) -> Result<BusinessCalendar, ConfigError> {
        let weekday_zone: Tz = self.weekday_timezone.parse().map_err(|_| ConfigError::InvalidTimezone {
            setting: "WEEKDAY_TIMEZONE",
            name: self.weekday_timezone.clone(),
        })?;
        let business_zone: Tz = self.business_timezone.parse().map_err(|_| ConfigError::InvalidTimezone {
            setting: "BUSINESS_TIMEZONE",
            name: self.business_timezone.clone(),
        })?;
        Ok(BusinessCalendar::new(weekday_zone, business_zone))
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("COMPANY_SERVICES_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("COMPANY_SERVICES_BASE_PATH") {
            self.server.base_path = v;
        }

        // Database overrides
        if let Ok(v) = env::var("STORAGE_BACKEND") {
            match v.parse() {
                Ok(storage) => self.database.storage = storage,
                Err(e) => tracing::warn!("Ignoring STORAGE_BACKEND: {}", e),
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_INIT_SCHEMA") {
            self.database.init_schema = v.parse().unwrap_or(self.database.init_schema);
        }

        // Calendar overrides
        if let Ok(v) = env::var("WEEKDAY_TIMEZONE") {
            self.calendar.weekday_timezone = v;
        }
        if let Ok(v) = env::var("BUSINESS_TIMEZONE") {
            self.calendar.business_timezone = v;
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        self
    }

    fn defaults(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig {
                port: 8282,
                base_path: "/CompanyServices".to_string(),
            },
            database: DatabaseConfig {
                storage: StorageBackend::Postgres,
                max_connections: 10,
                connection_timeout: 30,
                init_schema: false,
            },
            calendar: CalendarConfig {
                weekday_timezone: "UTC".to_string(),
                business_timezone: "America/New_York".to_string(),
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
            },
        }
    }

    pub fn development() -> Self {
        let mut config = Self::defaults(Environment::Development);
        config.database.init_schema = true;
        config
    }

    pub fn staging() -> Self {
        let mut config = Self::defaults(Environment::Staging);
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config
    }

    pub fn production() -> Self {
        let mut config = Self::defaults(Environment::Production);
        config.database.max_connections = 50;
        config.database.connection_timeout = 5;
        config.api.enable_request_logging = false;
        config.api.enable_cors = false;
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
