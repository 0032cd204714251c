//! Bouncer Bot library.
//!
//! This crate provides the Discord gateway process as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod db;
pub mod handlers;
pub mod messages;

use bouncer_core::VerificationLink;
use poise::serenity_prelude as serenity;
use sqlx::PgPool;

/// Shared state passed into every command and event handler.
///
/// Constructed once at startup and owned by the framework; handlers
/// never reach for ambient globals.
pub struct Data {
    /// `PostgreSQL` connection pool.
    pub pool: PgPool,
    /// The single guild this deployment serves.
    pub guild_id: serenity::GuildId,
    /// Role granted when a session completes.
    pub verified_role_id: serenity::RoleId,
    /// Deployment-selected correlation link encoding.
    pub link: VerificationLink,
}

/// Error type threaded through poise handlers.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Poise context alias for this bot.
pub type Context<'a> = poise::Context<'a, Data, Error>;
