//! Callback event types and decoding.

use serde::Deserialize;
use thiserror::Error;

/// A callback body could not be understood.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or missing `type` / `group_id`.
    #[error("invalid callback envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// A known event type whose `object` has the wrong shape.
    #[error("invalid object for {kind} event: {source}")]
    Object {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Wire shape shared by all callbacks.
#[derive(Debug, Deserialize)]
struct RawCallback {
    #[serde(rename = "type")]
    kind: String,
    group_id: i64,
    #[serde(default)]
    secret: String,
    #[serde(default)]
    event_id: Option<String>,
    #[serde(default)]
    object: serde_json::Value,
}

/// An authenticated-later, decoded callback.
#[derive(Debug, Clone)]
pub struct Callback {
    /// Community the callback claims to come from
    pub group_id: i64,
    /// Secret the callback claims to know
    pub secret: String,
    /// VK's unique event ID, absent on older API versions
    pub event_id: Option<String>,
    pub event: CallbackEvent,
}

/// A comment as carried by every `*_new`, `*_edit` and `*_restore` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Author; negative for communities
    #[serde(default)]
    pub from_id: i64,
    #[serde(default)]
    pub text: String,
    /// Actor this comment answers, 0 when it is not a reply
    #[serde(default)]
    pub reply_to_user: i64,
}

/// Comment under a wall post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WallComment {
    pub post_owner_id: i64,
    #[serde(default)]
    pub post_id: i64,
    #[serde(flatten)]
    pub comment: Comment,
}

/// Comment under a photo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoComment {
    pub photo_owner_id: i64,
    #[serde(default)]
    pub photo_id: i64,
    #[serde(flatten)]
    pub comment: Comment,
}

/// Comment under a video.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoComment {
    pub video_owner_id: i64,
    #[serde(default)]
    pub video_id: i64,
    #[serde(flatten)]
    pub comment: Comment,
}

/// Comment under a market item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketComment {
    pub market_owner_id: i64,
    #[serde(default)]
    pub item_id: i64,
    #[serde(flatten)]
    pub comment: Comment,
}

/// Callback events the moderator distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEvent {
    /// Server address confirmation; must be answered with the group's token
    Confirmation,

    WallReplyNew(WallComment),
    WallReplyEdit(WallComment),
    WallReplyRestore(WallComment),

    PhotoCommentNew(PhotoComment),
    PhotoCommentEdit(PhotoComment),
    PhotoCommentRestore(PhotoComment),

    VideoCommentNew(VideoComment),
    VideoCommentEdit(VideoComment),
    VideoCommentRestore(VideoComment),

    MarketCommentNew(MarketComment),
    MarketCommentEdit(MarketComment),
    MarketCommentRestore(MarketComment),

    /// Any other event type; acknowledged and ignored
    Other(String),
}

impl CallbackEvent {
    /// Decode `object` according to the callback `type`.
    fn from_parts(kind: &str, object: serde_json::Value) -> Result<Self, DecodeError> {
        fn object_of<T: serde::de::DeserializeOwned>(
            kind: &str,
            object: serde_json::Value,
        ) -> Result<T, DecodeError> {
            serde_json::from_value(object).map_err(|source| DecodeError::Object {
                kind: kind.to_string(),
                source,
            })
        }

        let event = match kind {
            "confirmation" => CallbackEvent::Confirmation,

            "wall_reply_new" => CallbackEvent::WallReplyNew(object_of(kind, object)?),
            "wall_reply_edit" => CallbackEvent::WallReplyEdit(object_of(kind, object)?),
            "wall_reply_restore" => CallbackEvent::WallReplyRestore(object_of(kind, object)?),

            "photo_comment_new" => CallbackEvent::PhotoCommentNew(object_of(kind, object)?),
            "photo_comment_edit" => CallbackEvent::PhotoCommentEdit(object_of(kind, object)?),
            "photo_comment_restore" => {
                CallbackEvent::PhotoCommentRestore(object_of(kind, object)?)
            }

            "video_comment_new" => CallbackEvent::VideoCommentNew(object_of(kind, object)?),
            "video_comment_edit" => CallbackEvent::VideoCommentEdit(object_of(kind, object)?),
            "video_comment_restore" => {
                CallbackEvent::VideoCommentRestore(object_of(kind, object)?)
            }

            "market_comment_new" => CallbackEvent::MarketCommentNew(object_of(kind, object)?),
            "market_comment_edit" => CallbackEvent::MarketCommentEdit(object_of(kind, object)?),
            "market_comment_restore" => {
                CallbackEvent::MarketCommentRestore(object_of(kind, object)?)
            }

            other => CallbackEvent::Other(other.to_string()),
        };

        Ok(event)
    }

    /// The callback `type` string this event was decoded from.
    pub fn kind(&self) -> &str {
        match self {
            CallbackEvent::Confirmation => "confirmation",
            CallbackEvent::WallReplyNew(_) => "wall_reply_new",
            CallbackEvent::WallReplyEdit(_) => "wall_reply_edit",
            CallbackEvent::WallReplyRestore(_) => "wall_reply_restore",
            CallbackEvent::PhotoCommentNew(_) => "photo_comment_new",
            CallbackEvent::PhotoCommentEdit(_) => "photo_comment_edit",
            CallbackEvent::PhotoCommentRestore(_) => "photo_comment_restore",
            CallbackEvent::VideoCommentNew(_) => "video_comment_new",
            CallbackEvent::VideoCommentEdit(_) => "video_comment_edit",
            CallbackEvent::VideoCommentRestore(_) => "video_comment_restore",
            CallbackEvent::MarketCommentNew(_) => "market_comment_new",
            CallbackEvent::MarketCommentEdit(_) => "market_comment_edit",
            CallbackEvent::MarketCommentRestore(_) => "market_comment_restore",
            CallbackEvent::Other(kind) => kind,
        }
    }

    /// Split a comment-bearing event into the content owner and the comment.
    ///
    /// New, edited and restored comments are treated alike; only the field
    /// holding the owner ID differs per content type.
    pub fn into_comment_target(self) -> Option<(i64, Comment)> {
        match self {
            CallbackEvent::WallReplyNew(c)
            | CallbackEvent::WallReplyEdit(c)
            | CallbackEvent::WallReplyRestore(c) => Some((c.post_owner_id, c.comment)),

            CallbackEvent::PhotoCommentNew(c)
            | CallbackEvent::PhotoCommentEdit(c)
            | CallbackEvent::PhotoCommentRestore(c) => Some((c.photo_owner_id, c.comment)),

            CallbackEvent::VideoCommentNew(c)
            | CallbackEvent::VideoCommentEdit(c)
            | CallbackEvent::VideoCommentRestore(c) => Some((c.video_owner_id, c.comment)),

            CallbackEvent::MarketCommentNew(c)
            | CallbackEvent::MarketCommentEdit(c)
            | CallbackEvent::MarketCommentRestore(c) => Some((c.market_owner_id, c.comment)),

            CallbackEvent::Confirmation | CallbackEvent::Other(_) => None,
        }
    }
}

/// Decode a raw callback body.
pub fn decode(body: &[u8]) -> Result<Callback, DecodeError> {
    let raw: RawCallback = serde_json::from_slice(body).map_err(DecodeError::Envelope)?;
    let event = CallbackEvent::from_parts(&raw.kind, raw.object)?;

    Ok(Callback {
        group_id: raw.group_id,
        secret: raw.secret,
        event_id: raw.event_id,
        event,
    })
}
