//! Server configuration
//!
//! Everything comes from environment variables (optionally seeded from a
//! `.env` file by `main`). No credentials are compiled in.

use std::fmt;

use super::error::{Result, ServerError};
use crate::seed::DEFAULT_SEED_COUNT;

const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_URL: &str = "sqlite://employees.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Environment switch, with `ENVIRONMENT` accepted as an alias
const ENV_VAR: &str = "FLASK_ENV";
const ENV_VAR_ALIAS: &str = "ENVIRONMENT";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse the value of the environment variable `name`
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ServerError::Config(format!(
                "{name} must be development or production, got {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub http_host: String,
    pub http_port: u16,
    /// SQLite connection string
    pub database_url: String,
    pub database_max_connections: u32,
    /// Reserved for session signing. No handler reads it yet; it is still
    /// required outside development.
    pub secret_key: String,
    /// Run idempotent seeding before serving
    pub seed_on_startup: bool,
    pub seed_count: usize,
    pub log_level: String,
    pub log_json: bool,
    /// Daily rolling log files go here when set
    pub log_dir: Option<String>,
    /// `USE_SENTRY` is accepted but no error-tracking backend is wired in
    pub use_sentry: bool,
}

// secret_key stays out of Debug output
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("http_host", &self.http_host)
            .field("http_port", &self.http_port)
            .field("database_url", &self.database_url)
            .field("database_max_connections", &self.database_max_connections)
            .field("secret_key", &"<redacted>")
            .field("seed_on_startup", &self.seed_on_startup)
            .field("seed_count", &self.seed_count)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("log_dir", &self.log_dir)
            .field("use_sentry", &self.use_sentry)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = resolve_environment(var(ENV_VAR), var(ENV_VAR_ALIAS))?;

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None if environment.is_development() => DEFAULT_DATABASE_URL.to_string(),
            None => {
                return Err(ServerError::Config(format!(
                    "DATABASE_URL must be set in {environment} environment"
                )));
            }
        };

        Ok(Self {
            environment,
            http_host: var("HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.into()),
            http_port: parse_or("HTTP_PORT", var("HTTP_PORT"), DEFAULT_HTTP_PORT)?,
            database_url,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            secret_key: require_secret("SECRET_KEY", lookup("SECRET_KEY"), environment)?,
            seed_on_startup: parse_bool(
                "SEED_ON_STARTUP",
                var("SEED_ON_STARTUP"),
                environment.is_development(),
            )?,
            seed_count: parse_or("SEED_COUNT", var("SEED_COUNT"), DEFAULT_SEED_COUNT)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_bool("LOG_JSON", var("LOG_JSON"), false)?,
            log_dir: var("LOG_DIR"),
            use_sentry: parse_bool("USE_SENTRY", var("USE_SENTRY"), false)?,
        })
    }

    /// Warn about settings that are parsed but have no effect
    pub fn log_ignored_settings(&self) {
        if self.use_sentry {
            tracing::warn!("USE_SENTRY is set but error tracking is not supported; ignoring");
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn resolve_environment(primary: Option<String>, alias: Option<String>) -> Result<Environment> {
    let primary = primary
        .map(|v| Environment::parse(ENV_VAR, &v))
        .transpose()?;
    let alias = alias
        .map(|v| Environment::parse(ENV_VAR_ALIAS, &v))
        .transpose()?;

    match (primary, alias) {
        (Some(a), Some(b)) if a != b => Err(ServerError::Config(format!(
            "{ENV_VAR}={a} conflicts with {ENV_VAR_ALIAS}={b}"
        ))),
        (Some(env), _) | (None, Some(env)) => Ok(env),
        (None, None) => Ok(Environment::Development),
    }
}

/// Require a secret: must be set and non-empty outside development.
fn require_secret(name: &str, value: Option<String>, environment: Environment) -> Result<String> {
    let val = match value {
        Some(v) => v,
        None => {
            if !environment.is_development() {
                return Err(ServerError::Config(format!(
                    "{name} must be set in {environment} environment"
                )));
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && !environment.is_development() {
        return Err(ServerError::Config(format!(
            "{name} must not be empty in {environment} environment"
        )));
    }
    Ok(val)
}

fn parse_or<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServerError::Config(format!("{name} has an invalid value: {raw:?}"))),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ServerError::Config(format!(
                "{name} must be a boolean, got {v:?}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.database_url, "sqlite://employees.db");
        assert_eq!(config.database_max_connections, 5);
        assert!(config.seed_on_startup);
        assert_eq!(config.seed_count, 1000);
        assert_eq!(config.secret_key, "dev-SECRET_KEY-not-for-production");
        assert!(!config.log_json);
        assert!(config.log_dir.is_none());
        assert!(!config.use_sentry);
    }

    #[test]
    fn test_production_requires_database_url() {
        let err = config_from(&[("FLASK_ENV", "production"), ("SECRET_KEY", "s3cr3t")])
            .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_production_requires_secret() {
        let err = config_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/roster.db"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY must be set"));

        let err = config_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/roster.db"),
            ("SECRET_KEY", ""),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY must not be empty"));
    }

    #[test]
    fn test_production_config_does_not_seed_by_default() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/roster.db"),
            ("SECRET_KEY", "s3cr3t"),
            ("HTTP_PORT", "8080"),
        ])
        .unwrap();
        assert!(!config.seed_on_startup);
        assert_eq!(config.http_port, 8080);
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }

    #[test]
    fn test_flask_env_selects_production() {
        let config = config_from(&[
            ("FLASK_ENV", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/roster.db"),
            ("SECRET_KEY", "s3cr3t"),
        ])
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.seed_on_startup);

        let err = config_from(&[("FLASK_ENV", "production")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_environment_alias() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/roster.db"),
            ("SECRET_KEY", "s3cr3t"),
        ])
        .unwrap();
        assert_eq!(config.environment, Environment::Production);

        let config = config_from(&[("FLASK_ENV", "dev"), ("ENVIRONMENT", "development")]).unwrap();
        assert_eq!(config.environment, Environment::Development);

        let err = config_from(&[("FLASK_ENV", "development"), ("ENVIRONMENT", "production")])
            .unwrap_err();
        assert!(err.to_string().contains("conflicts"));
    }

    #[test]
    fn test_rejects_unknown_environment() {
        let err = config_from(&[("FLASK_ENV", "staging")]).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        assert!(err.to_string().contains("FLASK_ENV"));

        assert!(matches!(
            config_from(&[("ENVIRONMENT", "staging")]),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_use_sentry_is_parsed() {
        let config = config_from(&[("USE_SENTRY", "true")]).unwrap();
        assert!(config.use_sentry);
        assert!(format!("{config:?}").contains("use_sentry: true"));
        assert!(config_from(&[("USE_SENTRY", "sometimes")]).is_err());
    }

    #[test]
    fn test_rejects_bad_numbers_and_flags() {
        assert!(config_from(&[("HTTP_PORT", "http")]).is_err());
        assert!(config_from(&[("SEED_ON_STARTUP", "maybe")]).is_err());

        let config = config_from(&[("SEED_ON_STARTUP", "0"), ("LOG_JSON", "yes")]).unwrap();
        assert!(!config.seed_on_startup);
        assert!(config.log_json);
    }
}
