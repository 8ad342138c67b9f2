//! Wire-level input shapes for reply headers, as received from a remote peer.
//!
//! Nothing here is trusted: every field is validated by the normalizer.
//! Payloads owned by other pipeline layers (raw media, raw entity records,
//! raw sender attribution) stay opaque as [`serde_json::Value`].

use serde::Deserialize;

use chatsync_types::ChatId;

/// Reference to a peer (chat) as spelled on the wire. Conversion to a
/// [`ChatId`] is total; validity is the normalizer's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeerRef {
    User { user_id: i64 },
    Group { group_id: i64 },
    Channel { channel_id: i64 },
}

impl From<PeerRef> for ChatId {
    fn from(peer: PeerRef) -> Self {
        match peer {
            PeerRef::User { user_id } => Self::User { id: user_id },
            PeerRef::Group { group_id } => Self::Group { id: group_id },
            PeerRef::Channel { channel_id } => Self::Channel { id: channel_id },
        }
    }
}

/// Cross-context origin data carried in a reply header.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WireOrigin {
    /// Publish date of the original message.
    pub date: i64,
    /// Channel post id; non-zero contradicts a cross-context person origin.
    pub channel_post: i64,
    /// Raw sender attribution, resolved by the origin resolver.
    pub sender: serde_json::Value,
}

/// The reply header of a wire-received message.
///
/// All fields are defaulted so partially populated headers deserialize; the
/// normalizer treats defaults as absence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplyHeader {
    /// The reply targets a scheduled message.
    pub reply_to_scheduled: bool,
    /// Raw numeric id of the target message; zero means no target.
    pub reply_to_message_id: i64,
    /// Present when the target lives in a different chat.
    pub reply_to_peer: Option<PeerRef>,
    /// Present when the target was forwarded into view from elsewhere.
    pub reply_from: Option<WireOrigin>,
    /// Raw media payload of the target, decoded by the content codec.
    pub reply_media: Option<serde_json::Value>,
    /// Quoted excerpt of the target's text.
    pub quote_text: String,
    /// Raw entity records for the quote, parsed by the entity parser.
    pub quote_entities: Vec<serde_json::Value>,
    /// Whether the quote was chosen by the user rather than auto-derived.
    pub quote_is_manual: bool,
}

impl ReplyHeader {
    /// Whether the header carries a non-empty media payload.
    pub fn has_media(&self) -> bool {
        self.reply_media.as_ref().is_some_and(|media| !media.is_null())
    }
}
