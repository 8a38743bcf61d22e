use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// 计数存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub store_backend: StoreBackend,
    pub redis_url: Option<String>,
    pub stats_namespace: String,
    pub scan_page_size: usize,
    pub max_limit: u64,
    pub store_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            store_backend: StoreBackend::Redis,
            redis_url: None,
            stats_namespace: "STATS".to_string(),
            scan_page_size: 1000,
            max_limit: 100_000,
            store_timeout_ms: 2000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse().map_err(|value| ConfigError::Invalid {
                var: "STORE_BACKEND",
                value,
            })?,
            Err(_) => defaults.store_backend,
        };
        let redis_url = env::var("REDIS_URL").ok();
        if store_backend == StoreBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            api_base_uri: env::var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            store_backend,
            redis_url,
            stats_namespace: env::var("STATS_NAMESPACE").unwrap_or(defaults.stats_namespace),
            scan_page_size: parse_var("SCAN_PAGE_SIZE", defaults.scan_page_size)?,
            max_limit: parse_var("MAX_LIMIT", defaults.max_limit)?,
            store_timeout_ms: parse_var("STORE_TIMEOUT_MS", defaults.store_timeout_ms)?,
        })
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
