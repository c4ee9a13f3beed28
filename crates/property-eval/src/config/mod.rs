use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::market::CENSUS_ACS5_URL;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub market: MarketApiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            market: MarketApiConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credentials and endpoints for the external market data lookups.
///
/// Keys default to empty strings; they are handed to each lookup call and
/// never written anywhere.
#[derive(Clone, Default)]
pub struct MarketApiConfig {
    pub census_api_key: String,
    pub zillow_api_key: String,
    pub census_api_url: String,
}

impl MarketApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let census_api_url =
            env::var("CENSUS_API_URL").unwrap_or_else(|_| CENSUS_ACS5_URL.to_string());
        if !census_api_url.starts_with("http://") && !census_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidCensusUrl(census_api_url));
        }

        Ok(Self {
            census_api_key: env::var("CENSUS_API_KEY").unwrap_or_default(),
            zillow_api_key: env::var("ZILLOW_API_KEY").unwrap_or_default(),
            census_api_url,
        })
    }
}

impl fmt::Debug for MarketApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketApiConfig")
            .field("census_api_key", &redact(&self.census_api_key))
            .field("zillow_api_key", &redact(&self.zillow_api_key))
            .field("census_api_url", &self.census_api_url)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCensusUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCensusUrl(url) => {
                write!(f, "CENSUS_API_URL must be an http(s) URL, got '{url}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidCensusUrl(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
