//! VK platform API access.
//!
//! The moderation pipeline only talks to VK through the [`PlatformApi`]
//! trait, so tests can swap in an in-memory fake. [`VkClient`] is the
//! production implementation over HTTPS.

pub mod client;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use client::VkClient;

/// Errors returned by platform API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// VK answered with a non-success HTTP status.
    #[error("unexpected http status {0}")]
    Status(u16),

    /// VK answered with an `error` envelope.
    #[error("vk api error {code}: {message}")]
    Api { code: i64, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed api response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.without_url())
    }
}

/// A user record as returned by `users.get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A community record as returned by `groups.getById`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
}

/// The subset of the VK API the moderator needs.
///
/// Implementations must be safe for concurrent use: every in-flight
/// moderation task shares the same instance.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Look up a user by (positive) ID.
    async fn users_get(&self, user_id: i64) -> Result<Vec<UserRecord>, ApiError>;

    /// Look up a community by (positive) ID.
    async fn groups_get_by_id(&self, group_id: i64) -> Result<Vec<GroupRecord>, ApiError>;

    /// Delete comment `comment_id` under content owned by `owner_id`.
    ///
    /// Returns whether VK reported the deletion as done.
    async fn delete_comment(&self, owner_id: i64, comment_id: i64) -> Result<bool, ApiError>;
}
