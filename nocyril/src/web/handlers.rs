//! Callback endpoint.
//!
//! The handler is designed to answer VK fast - it only:
//! 1. Decodes and authenticates the callback
//! 2. Answers the confirmation challenge, or acknowledges with `ok`
//! 3. Hands comment events to the moderation queue without waiting
//!
//! VK retries callbacks that are not acknowledged quickly, so nothing that
//! talks to the VK API runs here.

use std::sync::Arc;

use axum::{body::Bytes, extract::State};
use tracing::{debug, info, warn};

use crate::callback::{self, CallbackEvent};
use crate::moderate::{ModerationJob, ModerationQueue};
use crate::registry::GroupRegistry;
use crate::web::auth::{authenticate, AuthError};

/// Body VK expects for every accepted non-confirmation callback.
pub const ACK_BODY: &str = "ok";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GroupRegistry>,
    pub queue: ModerationQueue,
}

impl AppState {
    pub fn new(registry: GroupRegistry, queue: ModerationQueue) -> Self {
        Self {
            registry: Arc::new(registry),
            queue,
        }
    }
}

/// How a callback was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Body could not be decoded
    Malformed,
    /// `group_id` is not configured
    UnknownGroup,
    /// `secret` does not match the group's
    Unauthorized,
    /// Confirmation challenge answered with the group's token
    Confirmed(String),
    /// Accepted; comment events were queued for moderation
    Acknowledged,
}

impl CallbackOutcome {
    /// Response body for this outcome. Dropped callbacks get an empty body.
    pub fn into_body(self) -> String {
        match self {
            CallbackOutcome::Malformed
            | CallbackOutcome::UnknownGroup
            | CallbackOutcome::Unauthorized => String::new(),
            CallbackOutcome::Confirmed(token) => token,
            CallbackOutcome::Acknowledged => ACK_BODY.to_string(),
        }
    }
}

/// Process one raw callback body.
pub fn handle_callback(state: &AppState, body: &[u8]) -> CallbackOutcome {
    let cb = match callback::decode(body) {
        Ok(cb) => cb,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "callback_decode_failed");
            return CallbackOutcome::Malformed;
        }
    };

    info!(
        group_id = cb.group_id,
        event_type = cb.event.kind(),
        event_id = ?cb.event_id,
        "callback_received"
    );

    let group = match authenticate(&state.registry, cb.group_id, &cb.secret) {
        Ok(group) => group,
        Err(AuthError::UnknownGroup(_)) => return CallbackOutcome::UnknownGroup,
        Err(AuthError::SecretMismatch(_)) => return CallbackOutcome::Unauthorized,
    };

    match cb.event {
        CallbackEvent::Confirmation => {
            info!(group_id = cb.group_id, "callback_confirmed");
            CallbackOutcome::Confirmed(group.confirmation.clone())
        }
        event => {
            let kind = event.kind().to_string();

            match event.into_comment_target() {
                Some((owner_id, comment)) => {
                    state.queue.submit(ModerationJob { owner_id, comment });
                }
                None => {
                    debug!(group_id = cb.group_id, event_type = %kind, "callback_ignored");
                }
            }

            CallbackOutcome::Acknowledged
        }
    }
}

/// Callback endpoint, mounted at `/` for any method.
pub async fn callback(State(state): State<AppState>, body: Bytes) -> String {
    handle_callback(&state, &body).into_body()
}
