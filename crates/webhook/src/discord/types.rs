//! Discord REST API payload types.

use serde::Deserialize;

/// Error body returned by the Discord API.
///
/// Discord wraps failures in `{"code": .., "message": ..}`; both fields
/// default so a non-JSON body still produces something loggable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordApiError {
    /// Discord's JSON error code (0 when absent).
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
