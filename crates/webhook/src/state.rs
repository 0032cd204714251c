//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::WebhookConfig;
use crate::discord::DiscordClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the Discord REST client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebhookConfig,
    pool: PgPool,
    discord: DiscordClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebhookConfig, pool: PgPool) -> Self {
        let discord = DiscordClient::new(config.discord_token.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                discord,
            }),
        }
    }

    /// Get a reference to the webhook configuration.
    #[must_use]
    pub fn config(&self) -> &WebhookConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Discord REST client.
    #[must_use]
    pub fn discord(&self) -> &DiscordClient {
        &self.inner.discord
    }
}
