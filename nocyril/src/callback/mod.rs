//! VK Callback API payloads.
//!
//! Every callback is a JSON object with a `type` discriminator, the
//! `group_id` and `secret` used for authentication, and a type-specific
//! `object`. [`decode`] turns the raw body into a [`Callback`] whose
//! [`CallbackEvent`] is a closed sum type over the events the moderator
//! understands.

pub mod types;

pub use types::{
    decode, Callback, CallbackEvent, Comment, DecodeError, MarketComment, PhotoComment,
    VideoComment, WallComment,
};
