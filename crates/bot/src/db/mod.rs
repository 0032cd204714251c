//! Database operations for the verification protocol.
//!
//! ## Tables
//!
//! - `verified_users` - durable verification outcome, one row per user
//! - `verification_sessions` - explicit per-user session phase tracking
//!
//! Both tables are created idempotently at startup (see
//! [`ensure_schema`]); there is no separate migration step, so queries
//! use sqlx's runtime API rather than the compile-time-checked macros.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod sessions;
pub mod verified_users;

pub use sessions::SessionRepository;
pub use verified_users::VerifiedUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

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

/// Create the protocol tables if they do not exist yet.
///
/// Idempotent; both Bouncer processes run this at startup so either one
/// can start first.
///
/// # Errors
///
/// Returns `sqlx::Error` if table creation fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_VERIFIED_USERS).execute(pool).await?;
    sqlx::query(CREATE_VERIFICATION_SESSIONS).execute(pool).await?;
    Ok(())
}
