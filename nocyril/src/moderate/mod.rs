//! Comment moderation.
//!
//! ## Flow
//!
//! ```text
//! ModerationQueue → worker → flag_and_delete → resolve_name → should_flag → delete
//! ```

pub mod action;
pub mod classifier;
pub mod queue;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{flag_and_delete, moderate_comment, ActionError, Verdict};
pub use classifier::{should_flag, strip_mention};
pub use queue::{run_worker, ModerationJob, ModerationQueue};
pub use resolver::{resolve_name, ResolutionError};
