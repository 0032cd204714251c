//! Discord REST client.
//!
//! A minimal client for the one REST operation this process performs:
//! removing a member from the guild. The gateway connection lives in the
//! bot process; this side only needs authenticated REST calls.

use reqwest::{Client, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use bouncer_core::DiscordUserId;

use super::error::DiscordError;
use super::types::DiscordApiError;

/// Discord REST API base URL.
const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Discord REST API client.
#[derive(Clone)]
pub struct DiscordClient {
    /// HTTP client.
    client: Client,
    /// Bot token for authentication.
    bot_token: SecretString,
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("bot_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl DiscordClient {
    /// Create a new Discord client.
    #[must_use]
    pub fn new(bot_token: SecretString) -> Self {
        Self {
            client: Client::new(),
            bot_token,
        }
    }

    /// Remove a member from a guild (kick).
    ///
    /// `reason` lands in the guild's audit log.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError::MemberNotFound`] if the user is not
    /// currently a member, [`DiscordError::Forbidden`] if the bot cannot
    /// act on them, and a request/API error otherwise.
    #[instrument(skip(self, reason), fields(user_id = %user_id))]
    pub async fn remove_guild_member(
        &self,
        guild_id: u64,
        user_id: &DiscordUserId,
        reason: &str,
    ) -> Result<(), DiscordError> {
        let response = self
            .client
            .delete(format!(
                "{DISCORD_API_BASE}/guilds/{guild_id}/members/{user}",
                user = user_id.as_str()
            ))
            .header(
                header::AUTHORIZATION,
                format!("Bot {}", self.bot_token.expose_secret()),
            )
            .header("X-Audit-Log-Reason", reason)
            .send()
            .await
            .map_err(|e| DiscordError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                debug!("member removed from guild");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(DiscordError::MemberNotFound),
            StatusCode::FORBIDDEN => {
                let body = api_error(response).await;
                Err(DiscordError::Forbidden(body.message))
            }
            status => {
                let body = api_error(response).await;
                Err(DiscordError::Api {
                    status: status.as_u16(),
                    message: body.message,
                })
            }
        }
    }
}

/// Best-effort parse of Discord's error body.
async fn api_error(response: reqwest::Response) -> DiscordApiError {
    response.json().await.unwrap_or_else(|_| DiscordApiError {
        code: 0,
        message: "unknown error".to_string(),
    })
}
