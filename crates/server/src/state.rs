//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::TokenKeys;
use crate::swapi::SwapiClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is built once at startup;
/// nothing in the service reaches for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    swapi: SwapiClient,
    tokens: TokenKeys,
}

impl AppState {
    /// Create a new application state from the loaded configuration.
    #[must_use]
    pub fn new(config: &ServerConfig, pool: PgPool) -> Self {
        let swapi = SwapiClient::new(&config.swapi_base_url);
        let tokens = TokenKeys::new(config.jwt_secret.clone(), config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                swapi,
                tokens,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the SWAPI client.
    #[must_use]
    pub fn swapi(&self) -> &SwapiClient {
        &self.inner.swapi
    }

    /// Get a reference to the bearer token keys.
    #[must_use]
    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}
