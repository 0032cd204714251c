//! Bouncer Core - Shared protocol types library.
//!
//! This crate provides the pieces of the verification protocol shared by
//! both Bouncer processes:
//! - `bot` - Discord gateway process (slash command + DM reply listener)
//! - `webhook` - HTTP process receiving in-game confirmations
//!
//! # Architecture
//!
//! The core crate contains only types and pure protocol logic - no I/O,
//! no database access, no HTTP clients. This keeps it lightweight and
//! allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - User identifier, session phase machine, persisted rows
//! - [`link`] - Correlation link encoding/decoding
//! - [`reply`] - Completion keyword matching for the DM reply step

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod link;
pub mod reply;
pub mod types;

pub use link::{LaunchData, LinkError, VerificationLink};
pub use reply::{COMPLETION_KEYWORD, is_completion_reply};
pub use types::*;
