use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    port: u16,
    log_level: String,
    supabase_url: String,
    supabase_service_role_key: String,
    supabase_jwt_secret: String,
    http_timeout: Duration,
    http_max_idle_conns: usize,
    http_max_conns_per_host: usize,
    http_idle_conn_timeout: Duration,
    cache_jwt_ttl: Duration,
    cache_share_token_ttl: Duration,
    cache_cleanup_interval: Duration,
    max_page_size: i64,
    default_page_size: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_or(env::var("PORT").ok(), 4006u16, "PORT")?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let supabase_url =
            env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .map_err(|_| ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;
        let supabase_jwt_secret = env::var("SUPABASE_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("SUPABASE_JWT_SECRET"))?;

        let config = Self {
            port,
            log_level,
            supabase_url,
            supabase_service_role_key,
            supabase_jwt_secret,
            http_timeout: secs_or(env::var("HTTP_TIMEOUT_SECS").ok(), 30, "HTTP_TIMEOUT_SECS")?,
            http_max_idle_conns: parse_or(
                env::var("HTTP_MAX_IDLE_CONNS").ok(),
                100,
                "HTTP_MAX_IDLE_CONNS",
            )?,
            http_max_conns_per_host: parse_or(
                env::var("HTTP_MAX_CONNS_PER_HOST").ok(),
                10,
                "HTTP_MAX_CONNS_PER_HOST",
            )?,
            http_idle_conn_timeout: secs_or(
                env::var("HTTP_IDLE_CONN_TIMEOUT_SECS").ok(),
                90,
                "HTTP_IDLE_CONN_TIMEOUT_SECS",
            )?,
            cache_jwt_ttl: secs_or(env::var("CACHE_JWT_TTL_SECS").ok(), 300, "CACHE_JWT_TTL_SECS")?,
            cache_share_token_ttl: secs_or(
                env::var("CACHE_SHARE_TOKEN_TTL_SECS").ok(),
                60,
                "CACHE_SHARE_TOKEN_TTL_SECS",
            )?,
            cache_cleanup_interval: secs_or(
                env::var("CACHE_CLEANUP_INTERVAL_SECS").ok(),
                600,
                "CACHE_CLEANUP_INTERVAL_SECS",
            )?,
            max_page_size: parse_or(env::var("MAX_PAGE_SIZE").ok(), 100, "MAX_PAGE_SIZE")?,
            default_page_size: parse_or(
                env::var("DEFAULT_PAGE_SIZE").ok(),
                50,
                "DEFAULT_PAGE_SIZE",
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.supabase_url.is_empty() {
            return Err(ConfigError::Invalid("SUPABASE_URL must not be empty".into()));
        }
        if self.supabase_service_role_key.is_empty() {
            return Err(ConfigError::Invalid(
                "SUPABASE_SERVICE_ROLE_KEY must not be empty".into(),
            ));
        }
        if self.supabase_jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "SUPABASE_JWT_SECRET must not be empty".into(),
            ));
        }
        if self.http_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "HTTP_TIMEOUT_SECS must be positive".into(),
            ));
        }
        if self.cache_jwt_ttl.is_zero() {
            return Err(ConfigError::Invalid(
                "CACHE_JWT_TTL_SECS must be positive".into(),
            ));
        }
        if self.cache_share_token_ttl.is_zero() {
            return Err(ConfigError::Invalid(
                "CACHE_SHARE_TOKEN_TTL_SECS must be positive".into(),
            ));
        }
        if self.cache_cleanup_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "CACHE_CLEANUP_INTERVAL_SECS must be positive".into(),
            ));
        }
        if self.default_page_size <= 0 || self.max_page_size <= 0 {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(
                "DEFAULT_PAGE_SIZE must not exceed MAX_PAGE_SIZE".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn supabase_url(&self) -> &str {
        &self.supabase_url
    }

    pub fn supabase_service_role_key(&self) -> &str {
        &self.supabase_service_role_key
    }

    pub fn supabase_jwt_secret(&self) -> &str {
        &self.supabase_jwt_secret
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn http_max_idle_conns(&self) -> usize {
        self.http_max_idle_conns
    }

    pub fn http_max_conns_per_host(&self) -> usize {
        self.http_max_conns_per_host
    }

    pub fn http_idle_conn_timeout(&self) -> Duration {
        self.http_idle_conn_timeout
    }

    pub fn cache_jwt_ttl(&self) -> Duration {
        self.cache_jwt_ttl
    }

    pub fn cache_share_token_ttl(&self) -> Duration {
        self.cache_share_token_ttl
    }

    pub fn cache_cleanup_interval(&self) -> Duration {
        self.cache_cleanup_interval
    }

    pub fn max_page_size(&self) -> i64 {
        self.max_page_size
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    default: T,
    name: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(val) => val
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{name} must be a valid number"))),
    }
}

fn secs_or(
    raw: Option<String>,
    default_secs: u64,
    name: &'static str,
) -> Result<Duration, ConfigError> {
    parse_or(raw, default_secs, name).map(Duration::from_secs)
}
