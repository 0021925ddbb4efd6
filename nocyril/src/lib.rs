//! nocyril - VK callback webhook that removes Cyrillic comments.
//!
//! The library holds everything the `nocyril` binary wires together:
//! - `callback`: decoding of VK Callback API payloads
//! - `registry`: per-community secrets and confirmation tokens
//! - `web`: the axum endpoint that authenticates and acknowledges callbacks
//! - `moderate`: classification and deletion, run off the response path
//! - `vk`: the VK method API client
//!
//! ## Architecture
//!
//! ```text
//! VK → web (auth, ack) → ModerationQueue → worker → resolve / classify → wall.deleteComment
//! ```

pub mod callback;
pub mod config;
pub mod moderate;
pub mod registry;
pub mod vk;
pub mod web;

// Re-export commonly used types
pub use config::{Config, GroupConfig};
pub use moderate::ModerationQueue;
pub use registry::GroupRegistry;
pub use vk::{PlatformApi, VkClient};
pub use web::{router, AppState};
