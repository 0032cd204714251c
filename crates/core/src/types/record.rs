//! Persisted protocol rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::DiscordUserId;
use super::phase::SessionPhase;

/// A row of the `verified_users` table.
///
/// Keyed uniquely by `user_id`; only ever written as an upsert, and only
/// when a session completes. Rows are never deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct VerificationRecord {
    /// Discord user this record belongs to.
    pub user_id: DiscordUserId,
    /// Whether the user has completed verification.
    pub verified_status: bool,
    /// Last write time (monotonically non-decreasing across upserts).
    pub timestamp: DateTime<Utc>,
}

/// A row of the `verification_sessions` table.
///
/// Tracks a user's progress through the protocol explicitly instead of
/// inferring it from external side effects. One row per user; re-running
/// the command re-issues the same row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Discord user this session belongs to.
    pub user_id: DiscordUserId,
    /// Current phase of the session.
    pub phase: SessionPhase,
    /// The correlation link issued to the user, when the session was
    /// started via the command. Completion-only rows have no token.
    pub token: Option<String>,
    /// When the session row was first created.
    pub created_at: DateTime<Utc>,
    /// When the session row was last touched.
    pub updated_at: DateTime<Utc>,
}
