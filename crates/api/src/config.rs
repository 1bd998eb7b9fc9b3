use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://data/dunno.db`).
    pub database_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body, uploads included (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Secret for anti-forgery token signatures. Random per process if unset.
    pub antiforgery_secret: Option<String>,
    /// How long a rendered form stays submittable (default: 2 hours).
    pub antiforgery_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `DATABASE_URL`         | `sqlite://data/dunno.db` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`               |
    /// | `ANTIFORGERY_SECRET`   | (random)                 |
    /// | `ANTIFORGERY_TTL_SECS` | `7200`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/dunno.db".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let antiforgery_secret = std::env::var("ANTIFORGERY_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let antiforgery_ttl_secs: u64 = std::env::var("ANTIFORGERY_TTL_SECS")
            .unwrap_or_else(|_| "7200".into())
            .parse()
            .expect("ANTIFORGERY_TTL_SECS must be a valid u64");

        Self {
            host,
            port,
            database_url,
            request_timeout_secs,
            max_upload_bytes,
            antiforgery_secret,
            antiforgery_ttl: Duration::from_secs(antiforgery_ttl_secs),
        }
    }
}
