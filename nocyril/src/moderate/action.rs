//! Classify a comment and delete it when it violates the policy.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::classifier::should_flag;
use super::resolver::resolve_name;
use crate::callback::Comment;
use crate::vk::{ApiError, PlatformApi};

/// A flagged comment could not be deleted.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("delete request failed: {0}")]
    Api(#[from] ApiError),

    #[error("platform did not confirm the deletion")]
    NotConfirmed,
}

/// What happened to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No Cyrillic left after stripping the mention
    Passed,
    /// Flagged and deleted
    Deleted,
}

/// Run the full check on one comment and delete it if flagged.
///
/// Name resolution failures are logged and the unstripped text is
/// classified instead; only the deletion itself can fail.
pub async fn moderate_comment(
    api: &dyn PlatformApi,
    owner_id: i64,
    comment: &Comment,
) -> Result<Verdict, ActionError> {
    let mut mentioned_name = String::new();

    if comment.reply_to_user != 0 {
        match resolve_name(api, comment.reply_to_user).await {
            Ok(name) => mentioned_name = name,
            Err(e) => {
                warn!(
                    actor_id = comment.reply_to_user,
                    owner_id = owner_id,
                    comment_id = comment.id,
                    error = %e,
                    "moderation_name_resolution_failed"
                );
            }
        }
    }

    if !should_flag(&comment.text, &mentioned_name) {
        debug!(owner_id = owner_id, comment_id = comment.id, "moderation_comment_passed");
        return Ok(Verdict::Passed);
    }

    info!(
        owner_id = owner_id,
        comment_id = comment.id,
        text_length = comment.text.len(),
        "moderation_comment_flagged"
    );

    if !api.delete_comment(owner_id, comment.id).await? {
        return Err(ActionError::NotConfirmed);
    }

    Ok(Verdict::Deleted)
}

/// Detached entry point: moderate the comment and log the outcome.
pub async fn flag_and_delete(api: &dyn PlatformApi, owner_id: i64, comment: &Comment) {
    match moderate_comment(api, owner_id, comment).await {
        Ok(Verdict::Deleted) => {
            info!(owner_id = owner_id, comment_id = comment.id, "moderation_comment_deleted");
        }
        Ok(Verdict::Passed) => {}
        Err(e) => {
            error!(
                owner_id = owner_id,
                comment_id = comment.id,
                error = %e,
                "moderation_delete_failed"
            );
        }
    }
}
