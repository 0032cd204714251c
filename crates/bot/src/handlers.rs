//! Gateway event handlers.
//!
//! The reply listener lives here: the final protocol step is a DM with
//! the completion keyword, answered by the role grant and the persistent
//! verification record.

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use bouncer_core::{DiscordUserId, is_completion_reply};

use crate::db::{SessionRepository, VerifiedUserRepository};
use crate::messages;
use crate::{Data, Error};

/// Dispatch raw gateway events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(user = %data_about_bot.user.name, "bot connected");
        }
        serenity::FullEvent::Message { new_message } => {
            handle_direct_message(ctx, new_message, data).await;
        }
        _ => {}
    }

    Ok(())
}

/// Reply listener for the completion keyword.
///
/// Every runtime failure is caught here and converted into a DM to the
/// user; nothing propagates far enough to take the process down.
async fn handle_direct_message(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) {
    // Only direct messages from humans participate in the protocol.
    if msg.author.bot || msg.guild_id.is_some() {
        return;
    }

    // Anything but the completion keyword is dropped without feedback.
    if !is_completion_reply(&msg.content) {
        return;
    }

    let user_id = DiscordUserId::from_u64(msg.author.id.get());
    info!(user_id = %user_id, user = %msg.author.name, "completion keyword received");

    if let Err(err) = complete_verification(ctx, msg, data, &user_id).await {
        error!(user_id = %user_id, error = %err, "completion step failed");

        let notice = serenity::CreateMessage::new().content(messages::GENERIC_ERROR);
        if let Err(dm_err) = msg.author.dm(ctx, notice).await {
            warn!(user_id = %user_id, error = %dm_err, "could not deliver error notice");
        }
    }
}

/// Run the `Completed` transition for one user.
///
/// Membership is the gate: if the user is back in the guild they get the
/// role and the record, tracked session or not. Resending the keyword
/// re-runs all of this idempotently.
async fn complete_verification(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
    user_id: &DiscordUserId,
) -> Result<(), Error> {
    let member = match data.guild_id.member(ctx, msg.author.id).await {
        Ok(member) => member,
        Err(err) if is_unknown_member(&err) => {
            // Normal outcome: the user has not rejoined yet.
            info!(user_id = %user_id, "keyword received but user is not a member");

            msg.author
                .dm(
                    ctx,
                    serenity::CreateMessage::new().content(messages::REJOIN_GUIDANCE),
                )
                .await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    member.add_role(ctx, data.verified_role_id).await?;

    VerifiedUserRepository::new(&data.pool)
        .upsert_verified(user_id)
        .await?;

    // Role and record are already in place; a failed phase write only
    // costs us the session bookkeeping.
    let sessions = SessionRepository::new(&data.pool);
    if let Err(err) = sessions.complete(user_id).await {
        warn!(user_id = %user_id, error = %err, "could not record completed session");
    }

    info!(user_id = %user_id, "verification completed");

    msg.author
        .dm(
            ctx,
            serenity::CreateMessage::new().content(messages::VERIFICATION_SUCCESS),
        )
        .await?;

    Ok(())
}

/// Whether a gateway error is Discord telling us the user is not a
/// member of the guild.
fn is_unknown_member(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(resp))
            if resp.status_code.as_u16() == 404
    )
}

/// Framework-level error hook.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, error = %error, "command failed");
        }
        other => {
            if let Err(err) = poise::builtins::on_error(other).await {
                error!(error = %err, "error while handling framework error");
            }
        }
    }
}
