//! HTTP routes for the webhook process.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod verify;

pub use verify::{VerifyIngameRequest, VerifyIngameResponse};

/// Build the webhook router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/verify-ingame", post(verify::verify_ingame))
}

/// Health check endpoint.
///
/// Returns a static body if the server is running. Does not check
/// dependencies.
async fn health() -> &'static str {
    "Bouncer verification webhook is running."
}
