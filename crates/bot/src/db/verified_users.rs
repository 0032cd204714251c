//! Verified-user repository.
//!
//! The `verified_users` table is the durable outcome of the protocol:
//! one row per user, written only when a session completes.

use sqlx::PgPool;

use bouncer_core::{DiscordUserId, VerificationRecord};

use super::RepositoryError;

/// Repository for verified-user database operations.
pub struct VerifiedUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VerifiedUserRepository<'a> {
    /// Create a new verified-user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a completed verification.
    ///
    /// Upsert keyed by `user_id`: repeating the completion step never
    /// creates a second row, and the timestamp advances on every write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_verified(
        &self,
        user_id: &DiscordUserId,
    ) -> Result<VerificationRecord, RepositoryError> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            r"
            INSERT INTO verified_users (user_id, verified_status, timestamp)
            VALUES ($1, TRUE, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET verified_status = TRUE, timestamp = NOW()
            RETURNING user_id, verified_status, timestamp
            ",
        )
        .bind(user_id.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    /// Get the record for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        user_id: &DiscordUserId,
    ) -> Result<Option<VerificationRecord>, RepositoryError> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            r"
            SELECT user_id, verified_status, timestamp
            FROM verified_users
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }
}
