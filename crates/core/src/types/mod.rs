//! Core types for Bouncer.
//!
//! This module provides type-safe wrappers for the protocol's domain
//! concepts.

pub mod id;
pub mod phase;
pub mod record;

pub use id::{DiscordUserId, IdError};
pub use phase::{PhaseParseError, SessionPhase};
pub use record::{VerificationRecord, VerificationSession};
