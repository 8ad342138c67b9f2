use serde::{Deserialize, Serialize};

use crate::chat::ChatId;

/// Attribution of who originally authored a message that was forwarded or
/// cross-posted into the current context.
///
/// `Chat` and `Channel` origins carry an author signature; the signature is
/// the only part of an origin the server may legitimately rewrite after the
/// fact, which the change classifier relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageOrigin {
    /// No cross-context origin.
    #[default]
    None,
    /// Originally sent by a known user.
    User { user_id: i64 },
    /// Originally sent by a user who hid their account; only a display name
    /// survives.
    HiddenUser { sender_name: String },
    /// Originally sent on behalf of a chat.
    Chat {
        chat_id: ChatId,
        author_signature: String,
    },
    /// Originally a channel post.
    Channel {
        chat_id: ChatId,
        message_id: i64,
        author_signature: String,
    },
}

impl MessageOrigin {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether this origin kind carries an author signature field.
    pub fn has_sender_signature(&self) -> bool {
        matches!(self, Self::Chat { .. } | Self::Channel { .. })
    }
}

impl std::fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "no origin"),
            Self::User { user_id } => write!(f, "user {user_id}"),
            Self::HiddenUser { sender_name } => write!(f, "hidden user {sender_name:?}"),
            Self::Chat { chat_id, .. } => write!(f, "{chat_id}"),
            Self::Channel {
                chat_id,
                message_id,
                ..
            } => write!(f, "{chat_id} post {message_id}"),
        }
    }
}
