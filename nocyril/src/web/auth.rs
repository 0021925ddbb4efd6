//! Callback authentication.
//!
//! VK echoes the secret configured for the community in every callback's
//! `secret` field. A callback is trusted only if its `group_id` is known and
//! the secrets match exactly.

use thiserror::Error;
use tracing::warn;

use crate::config::GroupConfig;
use crate::registry::GroupRegistry;

/// Reasons a callback is dropped before dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no configuration for group {0}")]
    UnknownGroup(i64),

    #[error("secret mismatch for group {0}")]
    SecretMismatch(i64),
}

/// Find the group's settings and check the callback secret against them.
pub fn authenticate<'a>(
    registry: &'a GroupRegistry,
    group_id: i64,
    secret: &str,
) -> Result<&'a GroupConfig, AuthError> {
    let group = registry.lookup(group_id).ok_or_else(|| {
        warn!(group_id = group_id, "callback_unknown_group");
        AuthError::UnknownGroup(group_id)
    })?;

    if !constant_time_compare(&group.secret, secret) {
        warn!(
            group_id = group_id,
            expected_length = group.secret.len(),
            actual_length = secret.len(),
            "callback_secret_mismatch"
        );
        return Err(AuthError::SecretMismatch(group_id));
    }

    Ok(group)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
