//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use folio_core::{DEFAULT_PER_PAGE, RouteSegment};

/// Where the page tree is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// PostgreSQL, configured through the store's own variables.
    Postgres { database_url: String },
    /// A JSON array of pages loaded into memory at start-up.
    SeedFile(PathBuf),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Page tree source.
    pub source: PageSource,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Token between a page address and its page number.
    pub route_segment: RouteSegment,
    /// Window size of the HTML page view.
    pub per_page: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required, one of:
    /// - `DATABASE_URL`: Database connection string
    /// - `FOLIO_SEED_FILE`: JSON file of pages served from memory (wins if both are set)
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `PAGINATION_URL_ROUTE`: Pagination route segment (default: "page/")
    /// - `PAGINATION_PER_PAGE`: Page view window size (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source = match (lookup("FOLIO_SEED_FILE"), lookup("DATABASE_URL")) {
            (Some(path), _) => PageSource::SeedFile(PathBuf::from(path)),
            (None, Some(database_url)) => PageSource::Postgres { database_url },
            (None, None) => return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string())),
        };

        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());

        let route_segment = RouteSegment::from_setting(lookup("PAGINATION_URL_ROUTE").as_deref());

        let per_page = match lookup("PAGINATION_PER_PAGE") {
            None => DEFAULT_PER_PAGE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "PAGINATION_PER_PAGE".to_string(),
                        reason: format!("expected a positive integer, got {raw:?}"),
                    });
                }
            },
        };

        Ok(Self {
            source,
            port,
            log_level,
            cors_allowed_origins,
            route_segment,
            per_page,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
