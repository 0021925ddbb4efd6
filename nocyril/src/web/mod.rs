//! Web server module for the VK callback endpoint.
//!
//! This module provides a thin, fast web server that:
//! - Receives callbacks on `/`
//! - Authenticates them per community
//! - Answers confirmation challenges or acknowledges with `ok`
//! - Queues comment events for moderation without waiting for it

pub mod auth;
pub mod handlers;

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

pub use auth::{authenticate, AuthError};
pub use handlers::{callback, handle_callback, AppState, CallbackOutcome, ACK_BODY};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
