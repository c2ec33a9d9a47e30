//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FACEMATCH_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::comparator::DEFAULT_MODEL;
use crate::matcher::{DEFAULT_SCAN_CONCURRENCY, DEFAULT_THRESHOLD};

/// Maximum accepted upload size when `FACEMATCH_MAX_UPLOAD_BYTES` is unset.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FACEMATCH_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// S3-compatible object store endpoint. Default: `http://localhost:9000`.
    pub store_endpoint: String,

    /// Object store access key. Default: `minioadmin`.
    pub store_access_key: String,

    /// Object store secret key. Default: `minioadmin`.
    pub store_secret_key: String,

    /// Bucket holding the photo corpus. Default: `faces`.
    pub store_bucket: String,

    /// Key prefix the corpus lives under. Default: `profile_photos/`.
    pub corpus_prefix: String,

    /// MySQL connection URL for the identity metadata store.
    pub database_url: String,

    /// Face comparator service base URL. Default: `http://localhost:5000`.
    pub comparator_url: String,

    /// Face model the comparator should use. Default: `Facenet`.
    pub comparator_model: String,

    /// Distance threshold when the caller supplies none. Default: `0.4`.
    pub default_threshold: f64,

    /// Maximum accepted upload size in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Concurrent candidate evaluations per scan. Default: `4`.
    pub scan_concurrency: usize,

    /// Retries for a transient candidate fetch. Default: `2`.
    pub fetch_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            store_endpoint: "http://localhost:9000".to_string(),
            store_access_key: "minioadmin".to_string(),
            store_secret_key: "minioadmin".to_string(),
            store_bucket: "faces".to_string(),
            corpus_prefix: "profile_photos/".to_string(),
            database_url: "mysql://facematch@localhost:3306/faces".to_string(),
            comparator_url: "http://localhost:5000".to_string(),
            comparator_model: DEFAULT_MODEL.to_string(),
            default_threshold: DEFAULT_THRESHOLD,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            scan_concurrency: DEFAULT_SCAN_CONCURRENCY,
            fetch_retries: 2,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FACEMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "FACEMATCH_BIND_ADDR";
    const ENV_STORE_ENDPOINT: &'static str = "FACEMATCH_STORE_ENDPOINT";
    const ENV_STORE_ACCESS_KEY: &'static str = "FACEMATCH_STORE_ACCESS_KEY";
    const ENV_STORE_SECRET_KEY: &'static str = "FACEMATCH_STORE_SECRET_KEY";
    const ENV_STORE_BUCKET: &'static str = "FACEMATCH_STORE_BUCKET";
    const ENV_CORPUS_PREFIX: &'static str = "FACEMATCH_CORPUS_PREFIX";
    const ENV_DATABASE_URL: &'static str = "FACEMATCH_DATABASE_URL";
    const ENV_COMPARATOR_URL: &'static str = "FACEMATCH_COMPARATOR_URL";
    const ENV_COMPARATOR_MODEL: &'static str = "FACEMATCH_COMPARATOR_MODEL";
    const ENV_DEFAULT_THRESHOLD: &'static str = "FACEMATCH_DEFAULT_THRESHOLD";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "FACEMATCH_MAX_UPLOAD_BYTES";
    const ENV_SCAN_CONCURRENCY: &'static str = "FACEMATCH_SCAN_CONCURRENCY";
    const ENV_FETCH_RETRIES: &'static str = "FACEMATCH_FETCH_RETRIES";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            store_endpoint: Self::string_from_env(Self::ENV_STORE_ENDPOINT, defaults.store_endpoint),
            store_access_key: Self::string_from_env(
                Self::ENV_STORE_ACCESS_KEY,
                defaults.store_access_key,
            ),
            store_secret_key: Self::string_from_env(
                Self::ENV_STORE_SECRET_KEY,
                defaults.store_secret_key,
            ),
            store_bucket: Self::string_from_env(Self::ENV_STORE_BUCKET, defaults.store_bucket),
            corpus_prefix: Self::string_from_env(Self::ENV_CORPUS_PREFIX, defaults.corpus_prefix),
            database_url: Self::string_from_env(Self::ENV_DATABASE_URL, defaults.database_url),
            comparator_url: Self::string_from_env(
                Self::ENV_COMPARATOR_URL,
                defaults.comparator_url,
            ),
            comparator_model: Self::string_from_env(
                Self::ENV_COMPARATOR_MODEL,
                defaults.comparator_model,
            ),
            default_threshold: Self::f64_from_env(
                Self::ENV_DEFAULT_THRESHOLD,
                defaults.default_threshold,
            )?,
            max_upload_bytes: Self::usize_from_env(
                Self::ENV_MAX_UPLOAD_BYTES,
                defaults.max_upload_bytes,
            )?,
            scan_concurrency: Self::usize_from_env(
                Self::ENV_SCAN_CONCURRENCY,
                defaults.scan_concurrency,
            )?,
            fetch_retries: Self::u32_from_env(Self::ENV_FETCH_RETRIES, defaults.fetch_retries)?,
        })
    }

    /// Validates basic invariants.
    ///
    /// The threshold's numeric range is deliberately not restricted to
    /// (0, 1): out-of-range values flow through the match formula unchanged
    /// (a threshold of zero simply never matches).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                value: self.default_threshold.to_string(),
            });
        }

        if self.scan_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: self.scan_concurrency.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn string_from_env(name: &'static str, default: String) -> String {
        env::var(name).unwrap_or(default)
    }

    fn f64_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            Err(_) => Ok(default),
        }
    }

    fn usize_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            Err(_) => Ok(default),
        }
    }

    fn u32_from_env(name: &'static str, default: u32) -> Result<u32, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            Err(_) => Ok(default),
        }
    }
}
