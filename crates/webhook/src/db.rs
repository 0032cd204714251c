//! Database operations for the webhook process.
//!
//! The webhook only writes the `Confirmed` session phase; the schema is
//! shared with the bot process and both bootstrap it at startup so
//! either can start first.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use bouncer_core::{DiscordUserId, SessionPhase};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

const CREATE_VERIFIED_USERS: &str = r"
    CREATE TABLE IF NOT EXISTS verified_users (
        user_id TEXT PRIMARY KEY,
        verified_status BOOLEAN NOT NULL DEFAULT FALSE,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
";

const CREATE_VERIFICATION_SESSIONS: &str = r"
    CREATE TABLE IF NOT EXISTS verification_sessions (
        user_id TEXT PRIMARY KEY,
        phase TEXT NOT NULL,
        token TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
";

/// Create the protocol tables if they do not exist yet. Idempotent.
///
/// # Errors
///
/// Returns `sqlx::Error` if table creation fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_VERIFIED_USERS).execute(pool).await?;
    sqlx::query(CREATE_VERIFICATION_SESSIONS).execute(pool).await?;
    Ok(())
}

/// Advance an issued session to `Confirmed` after a successful kick.
///
/// Returns whether a row was actually advanced; `false` means the user
/// has no issued session (e.g. a confirmation call the bot never issued
/// a link for).
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn confirm_session(
    pool: &PgPool,
    user_id: &DiscordUserId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r"
        UPDATE verification_sessions
        SET phase = $2, updated_at = NOW()
        WHERE user_id = $1 AND phase = $3
        ",
    )
    .bind(user_id.as_str())
    .bind(SessionPhase::Confirmed.as_str())
    .bind(SessionPhase::Issued.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
