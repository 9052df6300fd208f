//! Configuration management for the leadgate service.
//!
//! Configuration is environment-sourced only. The service starts with
//! whatever is present; missing required keys are logged at startup and
//! surfaced by the `/env-check` diagnostic endpoint rather than aborting.

use std::{
    collections::BTreeMap,
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

/// Environment keys that a working deployment must provide.
///
/// Reported by `/env-check` and logged as missing at startup. Their absence
/// is never fatal; the affected endpoints fail lazily instead.
pub const REQUIRED_KEYS: [&str; 4] = ["DB_HOST", "DB_USER", "DB_PASSWORD", "API_SECRET_KEY"];

/// Number of leading characters of `DB_HOST` exposed by `/env-check`.
const HOST_SAMPLE_LEN: usize = 8;

/// Complete service configuration with defaults and environment overrides.
///
/// # Example
///
/// ```no_run
/// use leadgate_api::Config;
///
/// let config = Config::load().expect("failed to load configuration");
/// println!("listening on {}", config.server_addr());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Database
    /// Database server address.
    ///
    /// Environment variable: `DB_HOST`
    #[serde(default, alias = "DB_HOST")]
    pub db_host: String,
    /// Database port.
    ///
    /// Environment variable: `DB_PORT`
    #[serde(default = "default_db_port", alias = "DB_PORT")]
    pub db_port: u16,
    /// Database name.
    ///
    /// Environment variable: `DB_NAME`
    #[serde(default = "default_db_name", alias = "DB_NAME")]
    pub db_name: String,
    /// Database user.
    ///
    /// Environment variable: `DB_USER`
    #[serde(default, alias = "DB_USER")]
    pub db_user: String,
    /// Database password.
    ///
    /// Environment variable: `DB_PASSWORD`
    #[serde(default, alias = "DB_PASSWORD")]
    pub db_password: String,
    /// Whether to enable TLS on the database connection.
    ///
    /// Environment variable: `DB_SSL`
    #[serde(default, alias = "DB_SSL")]
    pub db_ssl: bool,
    /// Skip certificate verification when TLS is enabled, for servers with
    /// self-signed or otherwise untrusted certificates.
    ///
    /// Environment variable: `DB_SSL_ACCEPT_INVALID_CERTS`
    #[serde(default, alias = "DB_SSL_ACCEPT_INVALID_CERTS")]
    pub db_ssl_accept_invalid_certs: bool,
    /// Minimum TLS protocol version for compatibility with older servers.
    /// Surfaced for diagnostics; negotiation is delegated to the TLS backend.
    ///
    /// Environment variable: `DB_TLS_MIN_VERSION`
    #[serde(default, alias = "DB_TLS_MIN_VERSION")]
    pub db_tls_min_version: String,
    /// Maximum TLS protocol version. Surfaced for diagnostics; negotiation
    /// is delegated to the TLS backend.
    ///
    /// Environment variable: `DB_TLS_MAX_VERSION`
    #[serde(default, alias = "DB_TLS_MAX_VERSION")]
    pub db_tls_max_version: String,
    /// Maximum number of connections in the pool.
    ///
    /// Environment variable: `DB_MAX_CONNECTIONS`
    #[serde(default = "default_max_connections", alias = "DB_MAX_CONNECTIONS")]
    pub db_max_connections: u32,
    /// Pool acquire timeout in seconds.
    ///
    /// Environment variable: `DB_ACQUIRE_TIMEOUT`
    #[serde(default = "default_acquire_timeout", alias = "DB_ACQUIRE_TIMEOUT")]
    pub db_acquire_timeout: u64,

    // Auth
    /// Shared secret compared against the `x-api-key` header on the insert
    /// route. Empty means open mode: no auth check is performed.
    ///
    /// Environment variable: `API_SECRET_KEY`
    #[serde(default, alias = "API_SECRET_KEY")]
    pub api_secret_key: String,

    // Server
    /// Listen port. The bind address is fixed to all interfaces.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Loads configuration from built-in defaults overridden by environment
    /// variables. The environment is the only external source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be coerced to its field type or
    /// validation fails.
    pub fn load() -> Result<Self> {
        let figment =
            Figment::new().merge(Serialized::defaults(Self::default())).merge(Env::prefixed(""));

        let config: Self = figment.extract().context("failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Socket address the server binds to: all interfaces, configured port.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Connection options for the database built from the discrete fields.
    ///
    /// TLS mapping: disabled ⇒ `Disable`; enabled with the certificate trust
    /// override ⇒ `Require` (encrypted, unverified); enabled strict ⇒
    /// `VerifyFull`.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(&self.db_user)
            .password(&self.db_password)
            .ssl_mode(self.ssl_mode())
    }

    fn ssl_mode(&self) -> PgSslMode {
        if !self.db_ssl {
            PgSslMode::Disable
        } else if self.db_ssl_accept_invalid_certs {
            PgSslMode::Require
        } else {
            PgSslMode::VerifyFull
        }
    }

    /// Pool options sized from configuration.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout))
    }

    /// Database target description with the password omitted, for startup
    /// logs.
    pub fn database_target_masked(&self) -> String {
        format!("postgresql://{}@{}:{}/{}", self.db_user, self.db_host, self.db_port, self.db_name)
    }

    /// Required environment keys that are unset or empty in the process
    /// environment.
    pub fn missing_required_keys() -> Vec<&'static str> {
        REQUIRED_KEYS
            .into_iter()
            .filter(|key| std::env::var(key).map_or(true, |v| v.is_empty()))
            .collect()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be greater than 0");
        }

        if self.db_acquire_timeout == 0 {
            anyhow::bail!("DB_ACQUIRE_TIMEOUT must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: String::new(),
            db_port: default_db_port(),
            db_name: default_db_name(),
            db_user: String::new(),
            db_password: String::new(),
            db_ssl: false,
            db_ssl_accept_invalid_certs: false,
            db_tls_min_version: String::new(),
            db_tls_max_version: String::new(),
            db_max_connections: default_max_connections(),
            db_acquire_timeout: default_acquire_timeout(),
            api_secret_key: String::new(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "whatsapp_leads".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Presence report for one required environment key.
///
/// Never carries the value itself; `len` aids debugging truncated or
/// mis-pasted secrets, and only the server-address key gets a truncated
/// `sample`.
#[derive(Debug, Serialize)]
pub struct EnvKeyStatus {
    /// Whether the key is set and non-empty.
    pub present: bool,
    /// Length of the value when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    /// Truncated value, only for the server-address key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

/// Builds the `/env-check` report from the process environment.
pub fn env_report() -> BTreeMap<&'static str, EnvKeyStatus> {
    REQUIRED_KEYS
        .into_iter()
        .map(|key| {
            let value = std::env::var(key).ok().filter(|v| !v.is_empty());
            let status = match value {
                Some(value) => EnvKeyStatus {
                    present: true,
                    len: Some(value.chars().count()),
                    sample: (key == "DB_HOST")
                        .then(|| value.chars().take(HOST_SAMPLE_LEN).collect()),
                },
                None => EnvKeyStatus { present: false, len: None, sample: None },
            };
            (key, status)
        })
        .collect()
}
