//! In-game confirmation webhook handler.
//!
//! The game server calls this after the user completes the in-game step.
//! The handler kicks the user from the guild - the forced rejoin is the
//! proof the external step ran - and records the `Confirmed` phase.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use bouncer_core::DiscordUserId;

use crate::db;
use crate::error::AppError;
use crate::signature::{self, SIGNATURE_HEADER};
use crate::state::AppState;

/// Audit-log reason attached to the kick.
const KICK_REASON: &str = "Automated verification step: rejoin and reply DONE to the bot";

/// Request body sent by the game server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyIngameRequest {
    /// Identifier echoed back from the correlation link.
    pub discord_user_id: Option<String>,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct VerifyIngameResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Handle the in-game confirmation callback.
///
/// The sole transition into `Confirmed`: validate the payload, kick the
/// user, then record the phase. The raw body is taken as a `String` so
/// the optional signature check runs over exactly the bytes sent.
#[instrument(skip(state, headers, body))]
pub async fn verify_ingame(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    // Signed-body check, when configured. Without a secret the payload
    // is trusted verbatim (the original wire contract).
    if let Some(secret) = &state.config().signing_secret {
        let provided = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing signature header.".to_string()))?;

        signature::verify(secret, &body, provided)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    }

    let payload: VerifyIngameRequest = serde_json::from_str(&body)
        .map_err(|_| AppError::BadRequest("Discord User ID is required.".to_string()))?;

    let Some(raw_id) = payload.discord_user_id.filter(|id| !id.is_empty()) else {
        return Err(AppError::BadRequest(
            "Discord User ID is required.".to_string(),
        ));
    };

    // A malformed identifier counts as a removal failure (server class),
    // not a client validation error.
    let user_id = DiscordUserId::parse(&raw_id)
        .map_err(|e| AppError::Internal(format!("malformed user id: {e}")))?;

    state
        .discord()
        .remove_guild_member(state.config().guild_id, &user_id, KICK_REASON)
        .await?;

    info!(user_id = %user_id, "user kicked for verification");

    // The kick already happened, so a failed phase write must not fail
    // the response; the session simply stays at Issued.
    match db::confirm_session(state.pool(), &user_id).await {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user_id, "no issued session to confirm");
        }
        Err(err) => {
            warn!(user_id = %user_id, error = %err, "could not record confirmed session");
        }
    }

    Ok((
        StatusCode::OK,
        Json(VerifyIngameResponse {
            message: "User kicked successfully.".to_string(),
        }),
    ))
}
