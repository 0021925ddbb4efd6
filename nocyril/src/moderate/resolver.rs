//! Actor ID to display name resolution.

use thiserror::Error;

use crate::vk::{ApiError, PlatformApi};

/// A display name could not be determined.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("invalid actor id 0")]
    InvalidActor,

    #[error("platform request failed: {0}")]
    Api(#[from] ApiError),

    #[error("platform did not return the expected record for {0}")]
    UnexpectedRecord(i64),
}

/// Resolve an actor ID to the name VK puts in front of replies to it.
///
/// Positive IDs are users (first name), negative IDs are communities (name
/// of the community `-actor_id`). Zero never reaches the network.
pub async fn resolve_name(api: &dyn PlatformApi, actor_id: i64) -> Result<String, ResolutionError> {
    match actor_id {
        id if id > 0 => user_name(api, id).await,
        id if id < 0 => match id.checked_neg() {
            Some(group_id) => group_name(api, group_id).await,
            None => Err(ResolutionError::UnexpectedRecord(id)),
        },
        _ => Err(ResolutionError::InvalidActor),
    }
}

async fn user_name(api: &dyn PlatformApi, user_id: i64) -> Result<String, ResolutionError> {
    let users = api.users_get(user_id).await?;

    match users.into_iter().next() {
        Some(user) if user.id == user_id => Ok(user.first_name),
        _ => Err(ResolutionError::UnexpectedRecord(user_id)),
    }
}

async fn group_name(api: &dyn PlatformApi, group_id: i64) -> Result<String, ResolutionError> {
    let groups = api.groups_get_by_id(group_id).await?;

    match groups.into_iter().next() {
        Some(group) if group.id == group_id => Ok(group.name),
        _ => Err(ResolutionError::UnexpectedRecord(-group_id)),
    }
}
