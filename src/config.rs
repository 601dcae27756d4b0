//! Application configuration loaded from environment variables.

use std::env;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_ALLOWED_ORIGIN: &str = "http://localhost:3000";
    pub const DEV_JOB_TIMEOUT_MINUTES: u64 = 120; // stale evaluation jobs moved to ERROR
    pub const DEV_MAX_DATASETS_PER_TEST: usize = 50; // datasets per test run request
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origin allowed to call the API (None = same-origin only)
    pub allowed_origin: Option<String>,
    /// Minutes a job may sit in a non-terminal status before the watchdog
    /// moves it to ERROR
    pub job_timeout_minutes: u64,
    /// Maximum number of datasets accepted in a single run-test request
    pub max_datasets_per_test: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development):
    /// - All variables have sensible defaults
    /// - Only RUST_ENV is required
    ///
    /// In production mode (RUST_ENV=production):
    /// - Server will NOT start if the CORS origin is the development default
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `EVAL_HOST`: Server host (default: 127.0.0.1)
    /// - `EVAL_PORT`: Server port (default: 8080)
    /// - `EVAL_ALLOWED_ORIGIN`: CORS origin for the web UI (development
    ///   default: http://localhost:3000; unset in production = same-origin)
    /// - `EVAL_JOB_TIMEOUT_MINUTES`: Stale-job timeout in minutes (default: 120)
    /// - `EVAL_MAX_DATASETS_PER_TEST`: Max datasets per test run (default: 50)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        // Load values with defaults
        let host = env::var("EVAL_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("EVAL_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("EVAL_PORT must be a valid port number"))?;

        let allowed_origin = if environment.is_development() {
            Some(
                env::var("EVAL_ALLOWED_ORIGIN")
                    .unwrap_or_else(|_| defaults::DEV_ALLOWED_ORIGIN.to_string()),
            )
        } else {
            env::var("EVAL_ALLOWED_ORIGIN").ok()
        };

        let job_timeout_minutes = env::var("EVAL_JOB_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| defaults::DEV_JOB_TIMEOUT_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("EVAL_JOB_TIMEOUT_MINUTES must be a valid number")
            })?;

        let max_datasets_per_test = env::var("EVAL_MAX_DATASETS_PER_TEST")
            .unwrap_or_else(|_| defaults::DEV_MAX_DATASETS_PER_TEST.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("EVAL_MAX_DATASETS_PER_TEST must be a valid number")
            })?;

        let config = Config {
            environment,
            host,
            port,
            allowed_origin,
            job_timeout_minutes,
            max_datasets_per_test,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref origin) = self.allowed_origin
            && origin == defaults::DEV_ALLOWED_ORIGIN
        {
            errors.push(format!(
                "EVAL_ALLOWED_ORIGIN is using development default '{}'. Set the production UI origin or remove it.",
                defaults::DEV_ALLOWED_ORIGIN
            ));
        }

        if self.job_timeout_minutes == 0 {
            errors.push(
                "EVAL_JOB_TIMEOUT_MINUTES must be greater than zero in production.".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
