//! Fire-and-forget hand-off from the webhook handler to moderation.
//!
//! The handler only pushes a [`ModerationJob`] onto an unbounded channel,
//! which never blocks. A single worker loop drains the channel and spawns an
//! independent task per job, so slow VK calls never sit on the response path
//! and jobs finish in no particular order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::action::flag_and_delete;
use crate::callback::Comment;
use crate::vk::PlatformApi;

/// A comment waiting to be checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationJob {
    /// Owner of the commented content; negative for communities
    pub owner_id: i64,
    pub comment: Comment,
}

/// Cloneable submission side of the moderation pipeline.
#[derive(Clone)]
pub struct ModerationQueue {
    tx: mpsc::UnboundedSender<ModerationJob>,
}

impl ModerationQueue {
    /// Create a queue and the receiver a worker will drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ModerationJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Create a queue with a running worker that moderates through `api`.
    pub fn spawn(api: Arc<dyn PlatformApi>) -> (Self, JoinHandle<()>) {
        let (queue, rx) = Self::channel();
        let handle = tokio::spawn(run_worker(rx, api));
        (queue, handle)
    }

    /// Hand a comment over without waiting.
    ///
    /// Returns `false` when the worker is gone (only during shutdown).
    pub fn submit(&self, job: ModerationJob) -> bool {
        let owner_id = job.owner_id;
        let comment_id = job.comment.id;

        match self.tx.send(job) {
            Ok(()) => {
                debug!(owner_id = owner_id, comment_id = comment_id, "moderation_job_submitted");
                true
            }
            Err(_) => {
                warn!(owner_id = owner_id, comment_id = comment_id, "moderation_worker_unavailable");
                false
            }
        }
    }
}

/// Drain the queue, spawning one detached task per job.
///
/// Returns once every [`ModerationQueue`] handle is dropped. Tasks already
/// spawned keep running; nothing awaits them.
pub async fn run_worker(mut rx: mpsc::UnboundedReceiver<ModerationJob>, api: Arc<dyn PlatformApi>) {
    info!("moderation_worker_started");

    while let Some(job) = rx.recv().await {
        let api = Arc::clone(&api);

        tokio::spawn(async move {
            flag_and_delete(api.as_ref(), job.owner_id, &job.comment).await;
        });
    }

    info!("moderation_worker_stopped");
}
