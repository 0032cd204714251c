//! Discord-related errors.

use thiserror::Error;

/// Errors that can occur when calling the Discord REST API.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed.
    #[error("Discord request failed: {0}")]
    Request(String),

    /// The target user is not a member of the guild.
    #[error("user is not a member of the guild")]
    MemberNotFound,

    /// The bot lacks permission to act on the member.
    #[error("missing permission: {0}")]
    Forbidden(String),

    /// Discord API returned an unexpected error.
    #[error("Discord API error ({status}): {message}")]
    Api {
        /// HTTP status returned by Discord.
        status: u16,
        /// Discord's error message, if any.
        message: String,
    },
}
