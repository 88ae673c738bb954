//! Application settings loaded from files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server configuration
    pub server: ServerSettings,

    /// PostgreSQL database configuration
    pub database: DatabaseSettings,

    /// Storage backend selection
    pub storage: StorageSettings,

    /// JWT authentication configuration
    pub jwt: JwtSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Log output configuration
    pub log: LogSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on; 0 picks a free port
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

/// Where entities are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// `iss` claim written and required
    pub issuer: String,

    /// `aud` claim written and required
    pub audience: String,

    /// Access token lifetime in minutes
    pub expiry_minutes: i64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,

    pub format: LogFormat,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if it fails [`Settings::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.backend", "postgres")?
            .set_default("jwt.issuer", "chat-manager")?
            .set_default("jwt.audience", "chat-manager-clients")?
            .set_default("jwt.expiry_minutes", 120)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("log.level", "info,chat_manager=debug,sqlx=warn,tower_http=debug")?
            .set_default("log.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    /// Reject configurations the server cannot safely start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters for security. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                self.jwt.secret.len()
            )));
        }
        if self.jwt.expiry_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiry_minutes must be positive".into(),
            ));
        }
        if self.storage.backend == StorageBackend::Postgres && self.database.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) is required for the postgres backend".into(),
            ));
        }
        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Settings {
    /// Settings for a self-contained instance: in-memory storage, loopback
    /// address and an ephemeral port.
    pub fn local(jwt_secret: impl Into<String>) -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseSettings {
                url: String::new(),
                max_connections: 1,
                min_connections: 0,
                acquire_timeout: 1,
                run_migrations: false,
            },
            storage: StorageSettings {
                backend: StorageBackend::Memory,
            },
            jwt: JwtSettings {
                secret: jwt_secret.into(),
                issuer: "chat-manager".into(),
                audience: "chat-manager-clients".into(),
                expiry_minutes: 120,
            },
            cors: CorsSettings {
                allowed_origins: vec!["http://localhost:3000".into()],
            },
            log: LogSettings {
                level: "info".into(),
                format: LogFormat::Pretty,
            },
            environment: "local".into(),
        }
    }
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid server address: {}", e)))
    }
}
