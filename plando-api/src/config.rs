/// Configuration management for the API server
///
/// Configuration comes from environment variables, optionally seeded from a
/// `.env` file in development.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: Secret key for JWT signing, at least 32 characters (required)
/// - `JWT_EXPIRATION_MINUTES`: Token lifetime (default: 60)
/// - `WEATHER_API_URL`: Weather feed URL (default: the public f-api feed)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter, read by the tracing subscriber
///
/// # Example
///
/// ```no_run
/// use plando_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use plando_shared::weather::DEFAULT_WEATHER_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub weather: WeatherConfig,
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    #[serde(skip_serializing)]
    pub secret: String,

    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub url: String,
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_port = get("API_PORT", "8080")
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let cors_origins = get("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = get("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expiration_minutes = get("JWT_EXPIRATION_MINUTES", "60")
            .parse::<i64>()
            .context("JWT_EXPIRATION_MINUTES must be an integer")?;

        if expiration_minutes <= 0 {
            anyhow::bail!("JWT_EXPIRATION_MINUTES must be positive");
        }

        Ok(Self {
            api: ApiConfig {
                host: get("API_HOST", "0.0.0.0"),
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_minutes,
            },
            weather: WeatherConfig {
                url: get("WEATHER_API_URL", DEFAULT_WEATHER_URL),
            },
            log_format: get("LOG_FORMAT", "pretty").parse()?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}
