//! The normalized reply-reference value.

use chatsync_types::{ChatId, ContentSnapshot, FormattedText, MessageId, MessageOrigin};

use crate::capabilities::ContentCodec;

/// A validated reference to the message another message replies to.
///
/// Immutable once constructed: consumers never mutate fields, a re-synced
/// message replaces its reference wholesale. Construction happens either
/// from wire data via [`ReplyNormalizer`](crate::normalize::ReplyNormalizer)
/// or from a locally-pending target via [`RepliedReference::from_pending`].
///
/// Finalized values uphold: no `chat_id` without a `message_id`, and never
/// a scheduled `message_id` together with a populated `chat_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepliedReference {
    pub(crate) message_id: MessageId,
    pub(crate) chat_id: Option<ChatId>,
    pub(crate) origin_date: i64,
    pub(crate) origin: MessageOrigin,
    pub(crate) quote: FormattedText,
    pub(crate) is_quote_manual: bool,
    pub(crate) content: Option<ContentSnapshot>,
}

impl RepliedReference {
    /// Build a reference for a locally-pending reply: the user picked a
    /// target before sending. Only the target id is carried over; an invalid
    /// target yields an empty reference.
    pub fn from_pending(target: MessageId) -> Self {
        if !target.is_valid() {
            return Self::default();
        }
        Self {
            message_id: target,
            ..Self::default()
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// The chat the target lives in, when different from the owning chat.
    pub fn chat_id(&self) -> Option<ChatId> {
        self.chat_id
    }

    pub fn origin_date(&self) -> i64 {
        self.origin_date
    }

    pub fn origin(&self) -> &MessageOrigin {
        &self.origin
    }

    pub fn quote(&self) -> &FormattedText {
        &self.quote
    }

    pub fn is_quote_manual(&self) -> bool {
        self.is_quote_manual
    }

    pub fn content(&self) -> Option<&ContentSnapshot> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Deep value equality, delegating content comparison to the codec.
    /// Contents are equal only when both of the codec's signals are clear.
    pub fn equivalent(&self, other: &Self, codec: &dyn ContentCodec) -> bool {
        if self.message_id != other.message_id
            || self.chat_id != other.chat_id
            || self.origin_date != other.origin_date
            || self.origin != other.origin
            || self.quote != other.quote
            || self.is_quote_manual != other.is_quote_manual
        {
            return false;
        }
        codec
            .compare(self.content.as_ref(), other.content.as_ref())
            .is_equal()
    }

    /// Whether the content snapshot is stale enough that the owning message
    /// should be refetched.
    pub fn needs_refetch(&self, codec: &dyn ContentCodec) -> bool {
        self.content
            .as_ref()
            .is_some_and(|content| codec.needs_refetch(content))
    }

    /// The target id when the reply stays within its own chat; `None`
    /// identity otherwise.
    pub fn same_chat_target(&self) -> MessageId {
        if self.chat_id.is_none() {
            self.message_id
        } else {
            MessageId::None
        }
    }

    /// The full (chat, message) coordinates of the target, resolving a
    /// same-chat reply against the owning chat.
    pub fn target_in(&self, owner_chat: ChatId) -> Option<(ChatId, MessageId)> {
        if !self.message_id.is_valid() && !self.message_id.is_valid_scheduled() {
            return None;
        }
        Some((self.chat_id.unwrap_or(owner_chat), self.message_id))
    }
}

impl std::fmt::Display for RepliedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reply to {}", self.message_id)?;
        if let Some(chat_id) = self.chat_id {
            write!(f, " in {chat_id}")?;
        }
        if self.origin_date != 0 {
            write!(f, " sent at {} by {}", self.origin_date, self.origin)?;
        }
        if !self.quote.is_empty() {
            write!(
                f,
                " with {} quoted chars{}",
                self.quote.text.chars().count(),
                if self.is_quote_manual { " (manual)" } else { "" }
            )?;
        }
        if let Some(content) = &self.content {
            write!(f, " and {} content", content.kind_name())?;
        }
        Ok(())
    }
}
