//! Slash command handlers.

use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use bouncer_core::DiscordUserId;

use crate::db::SessionRepository;
use crate::messages;
use crate::{Context, Error};

/// Starts the verification process to gain access to the server.
///
/// The only entry point into a session: encodes the correlation link for
/// the invoker and delivers it by DM. May be invoked repeatedly; each
/// run simply restarts the session at `Issued` with a fresh (identical)
/// token.
#[poise::command(slash_command, guild_only)]
pub async fn verify(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let user_id = DiscordUserId::from_u64(author.id.get());

    info!(user_id = %user_id, user = %author.name, "verification started");

    let link = ctx.data().link.encode(&user_id, Some(&author.name))?;

    let dm = author
        .dm(
            ctx.serenity_context(),
            serenity::CreateMessage::new().content(messages::verification_instructions(&link)),
        )
        .await;

    match dm {
        Ok(_) => {
            // The session enters Issued only once the link is delivered.
            // A failed write leaves the flow functional, so log and move on.
            let sessions = SessionRepository::new(&ctx.data().pool);
            if let Err(err) = sessions.begin(&user_id, link.as_str()).await {
                warn!(user_id = %user_id, error = %err, "could not record issued session");
            }

            ctx.send(
                poise::CreateReply::default()
                    .content(messages::DM_SENT_ACK)
                    .ephemeral(true),
            )
            .await?;
        }
        Err(err) => {
            // DMs disabled: tell the invoker how to fix it, nothing else.
            warn!(user_id = %user_id, error = %err, "could not DM verification link");

            ctx.send(
                poise::CreateReply::default()
                    .content(messages::DM_BLOCKED_REMEDIATION)
                    .ephemeral(true),
            )
            .await?;
        }
    }

    Ok(())
}
