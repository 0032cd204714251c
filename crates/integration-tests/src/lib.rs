//! Integration tests for Bouncer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bouncer-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `verification_protocol` - Core protocol types: correlation links,
//!   the session phase machine, reply matching
//! - `webhook_routes` - Webhook router behavior via
//!   `tower::ServiceExt::oneshot` (validation and signature paths)
//! - `bot_messages` - User-facing message texts of the bot process
//!
//! None of the tests need a live Discord connection or database: the
//! webhook tests use a lazily-connecting pool and exercise only paths
//! that return before any network call.
