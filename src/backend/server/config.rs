/**
 * Server Configuration
 *
 * This module loads the process-wide configuration once at startup: the
 * session signing secret, the optional Postgres connection, CORS origin,
 * cookie security, and the credentials of the optional media and chat
 * integrations.
 *
 * # Configuration Sources
 *
 * Values come from environment variables (after `dotenv` has loaded an
 * optional `.env` file). Only `JWT_SECRET` is mandatory; everything else
 * has a development default or disables the feature that needs it.
 *
 * # Secrets
 *
 * Secrets are held in `SigningSecret`, whose `Debug` output is redacted, so
 * logging a config value never prints them.
 */

use std::fmt;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// A secret string whose `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([redacted])")
    }
}

/// Cloudinary credentials for avatar uploads.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SigningSecret,
}

/// Stream Chat credentials.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub api_key: String,
    pub api_secret: SigningSecret,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub jwt_secret: SigningSecret,
    /// `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    /// CORS origin allowed to send credentialed requests
    pub allowed_origin: HeaderValue,
    /// Marks the session cookie `Secure`
    pub production: bool,
    pub bcrypt_cost: u32,
    pub cloudinary: Option<CloudinaryConfig>,
    pub stream: Option<StreamConfig>,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder(jwt_secret: impl Into<String>) -> ServerConfigBuilder {
        ServerConfigBuilder::new(jwt_secret)
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        let mut builder = ServerConfigBuilder::new(jwt_secret);

        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = get("SERVER_PORT") {
            let port = port.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                reason: e.to_string(),
            })?;
            builder = builder.port(port);
        }
        if let Some(origin) = get("FRONTEND_URL") {
            builder = builder.frontend_url(origin);
        }
        if let Some(env) = get("APP_ENV") {
            builder = builder.production(env.eq_ignore_ascii_case("production"));
        }
        if let Some(cost) = get("BCRYPT_COST") {
            let cost = cost.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                reason: e.to_string(),
            })?;
            builder = builder.bcrypt_cost(cost);
        }

        match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                builder = builder.cloudinary(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret: SigningSecret::new(api_secret),
                });
            }
            (None, None, None) => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "CLOUDINARY_*",
                    reason: "cloud name, API key and API secret must be set together".to_string(),
                })
            }
        }

        match (get("STREAM_API_KEY"), get("STREAM_API_SECRET")) {
            (Some(api_key), Some(api_secret)) => {
                builder = builder.stream(StreamConfig {
                    api_key,
                    api_secret: SigningSecret::new(api_secret),
                });
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "STREAM_*",
                    reason: "API key and API secret must be set together".to_string(),
                })
            }
        }

        builder.build()
    }
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    jwt_secret: String,
    database_url: Option<String>,
    port: u16,
    frontend_url: String,
    production: bool,
    bcrypt_cost: u32,
    cloudinary: Option<CloudinaryConfig>,
    stream: Option<StreamConfig>,
}

impl ServerConfigBuilder {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            database_url: None,
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            production: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cloudinary: None,
            stream: None,
        }
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn cloudinary(mut self, config: CloudinaryConfig) -> Self {
        self.cloudinary = Some(config);
        self
    }

    pub fn stream(mut self, config: StreamConfig) -> Self {
        self.stream = Some(config);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                reason: format!("{} is outside 4..=31", self.bcrypt_cost),
            });
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.frontend_url));
        }
        let allowed_origin = HeaderValue::from_str(self.frontend_url.trim_end_matches('/'))
            .map_err(|_| ConfigError::InvalidUrl(self.frontend_url.clone()))?;

        Ok(ServerConfig {
            jwt_secret: SigningSecret::new(self.jwt_secret),
            database_url: self.database_url,
            port: self.port,
            allowed_origin,
            production: self.production,
            bcrypt_cost: self.bcrypt_cost,
            cloudinary: self.cloudinary,
            stream: self.stream,
        })
    }
}
