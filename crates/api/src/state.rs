use std::sync::Arc;

use dunno_core::antiforgery::Antiforgery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dunno_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Issues and checks the tokens embedded in every rendered form.
    pub antiforgery: Arc<Antiforgery>,
}

impl AppState {
    pub fn new(pool: dunno_db::DbPool, config: ServerConfig) -> Self {
        let antiforgery = match &config.antiforgery_secret {
            Some(secret) => Antiforgery::new(secret.as_bytes(), config.antiforgery_ttl),
            None => {
                tracing::warn!("ANTIFORGERY_SECRET not set; forms expire on restart");
                Antiforgery::with_random_secret(config.antiforgery_ttl)
            }
        };

        Self {
            pool,
            config: Arc::new(config),
            antiforgery: Arc::new(antiforgery),
        }
    }
}
