//! Verification-session repository.
//!
//! Tracks each user's progress through the protocol explicitly (one row
//! per user) instead of inferring the phase from external side effects.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bouncer_core::{DiscordUserId, SessionPhase, VerificationSession};

use super::RepositoryError;

/// Raw row shape; the phase is stored as lowercase TEXT.
#[derive(sqlx::FromRow)]
struct SessionRow {
    user_id: DiscordUserId,
    phase: String,
    token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for VerificationSession {
    type Error = RepositoryError;

    fn try_from(row: SessionRow) -> Result<Self, RepositoryError> {
        let phase = SessionPhase::from_str(&row.phase).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phase in database: {e}"))
        })?;

        Ok(Self {
            user_id: row.user_id,
            phase,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for verification-session database operations.
pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Start (or restart) a session at `Issued`.
    ///
    /// Re-running the command restarts the session with a fresh token;
    /// the upsert keeps the row unique per user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn begin(
        &self,
        user_id: &DiscordUserId,
        token: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO verification_sessions (user_id, phase, token, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET phase = $2, token = $3, updated_at = NOW()
            ",
        )
        .bind(user_id.as_str())
        .bind(SessionPhase::Issued.as_str())
        .bind(token)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Advance an issued session to `Confirmed`.
    ///
    /// Returns whether a row was actually advanced; `false` means the
    /// user has no issued session (e.g. an untracked webhook call).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn confirm(&self, user_id: &DiscordUserId) -> Result<bool, RepositoryError> {
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
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Record the terminal `Completed` phase.
    ///
    /// Idempotent, and creates the row if the user completed without a
    /// tracked session (membership, not phase, gates completion).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn complete(&self, user_id: &DiscordUserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO verification_sessions (user_id, phase, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET phase = $2, updated_at = NOW()
            ",
        )
        .bind(user_id.as_str())
        .bind(SessionPhase::Completed.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get a user's session, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored phase is
    /// not recognized.
    pub async fn get(
        &self,
        user_id: &DiscordUserId,
    ) -> Result<Option<VerificationSession>, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            SELECT user_id, phase, token, created_at, updated_at
            FROM verification_sessions
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(VerificationSession::try_from).transpose()
    }
}
