//! Client-facing projection of a reply reference.

use {
    chatsync_types::{ChatId, FormattedText, MessageId, MessageOrigin},
    serde::Serialize,
};

use crate::{
    capabilities::{ContentCodec, ProjectedContent},
    reference::RepliedReference,
};

/// What the client API sees for a reply. Absent quote/origin/content are
/// omitted from the serialized form, not sent as null placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyToMessage {
    /// The chat the target message lives in.
    pub chat_id: ChatId,
    pub message_id: MessageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<FormattedText>,
    pub is_quote_manual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<MessageOrigin>,
    pub origin_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl RepliedReference {
    /// Project for the client API. `owner_chat` resolves same-chat replies
    /// and must be valid; a reply origin can never be a channel post by the
    /// time it reaches projection. Both are caller contract violations, not
    /// recoverable conditions.
    pub fn to_api(&self, codec: &dyn ContentCodec, owner_chat: ChatId) -> ReplyToMessage {
        let chat_id = match self.chat_id {
            Some(chat_id) => chat_id,
            None => {
                assert!(owner_chat.is_valid(), "projection needs a valid owning chat");
                owner_chat
            },
        };

        let quote = (!self.quote.is_empty()).then(|| self.quote.clone());

        let origin = (!self.origin.is_empty()).then(|| {
            assert!(
                !matches!(self.origin, MessageOrigin::Channel { .. }),
                "a reply origin cannot be a channel post"
            );
            self.origin.clone()
        });

        let content = self.content.as_ref().and_then(|content| {
            match codec.project(content, chat_id) {
                // Absence, not a placeholder, is what the client sees.
                ProjectedContent::Unsupported => None,
                ProjectedContent::Rendered { content } => Some(content),
            }
        });

        ReplyToMessage {
            chat_id,
            message_id: self.message_id,
            quote,
            is_quote_manual: self.is_quote_manual,
            origin,
            origin_date: self.origin_date,
            content,
        }
    }
}
