//! Discord REST integration for the webhook process.
//!
//! This module provides:
//! - [`DiscordClient`] for the ejection side effect (guild kick)
//! - Error types distinguishing "not a member" from real failures
//!
//! # Flow
//!
//! 1. The game server confirms the in-game step via `POST /verify-ingame`
//! 2. The handler kicks the user from the guild (proof the step ran)
//! 3. The user rejoins and finishes the flow with the bot process

mod client;
mod error;
mod types;

pub use client::DiscordClient;
pub use error::DiscordError;
pub use types::DiscordApiError;
