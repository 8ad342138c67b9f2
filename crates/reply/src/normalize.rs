//! Builds a [`RepliedReference`] from an untrusted wire reply header.

use chatsync_types::{
    ChatId, FormatOptions, FormattedText, MessageId, clean_plain_text, fix_formatted_text,
    text::QUOTE_LENGTH_MAX,
};

use crate::{
    capabilities::{ContentCodec, OriginResolver, SequencingPolicy, TextEntityParser},
    diagnostics::{Anomaly, AnomalyKind, DiagnosticSink},
    reference::RepliedReference,
    wire::ReplyHeader,
};

/// The message whose header is being normalized.
#[derive(Debug, Clone, Copy)]
pub struct OwnerContext {
    /// Chat the owning message lives in.
    pub chat_id: ChatId,
    /// Identity of the owning message itself.
    pub message_id: MessageId,
    /// Publish date of the owning message; doubles as the send date of a
    /// scheduled reply target.
    pub date: i64,
}

/// Normalizes wire reply headers into [`RepliedReference`] values.
///
/// Normalization is total: it never fails and never trusts the header.
/// Inconsistent fields degrade to empty and are reported to the diagnostic
/// sink with the owning message's coordinates.
pub struct ReplyNormalizer<'a> {
    pub origins: &'a dyn OriginResolver,
    pub codec: &'a dyn ContentCodec,
    pub entities: &'a dyn TextEntityParser,
    pub sequencing: &'a dyn SequencingPolicy,
    pub diagnostics: &'a dyn DiagnosticSink,
}

impl ReplyNormalizer<'_> {
    pub fn normalize(&self, header: ReplyHeader, owner: &OwnerContext) -> RepliedReference {
        let mut reference = RepliedReference::default();
        if header.reply_to_scheduled {
            self.normalize_scheduled(&header, owner, &mut reference);
        } else {
            self.normalize_regular(&header, owner, &mut reference);
        }
        self.normalize_quote(header, owner, &mut reference);
        reference
    }

    fn normalize_scheduled(
        &self,
        header: &ReplyHeader,
        owner: &OwnerContext,
        reference: &mut RepliedReference,
    ) {
        reference.message_id = MessageId::Scheduled {
            server_id: header.reply_to_message_id,
            send_date: owner.date,
        };
        if reference.message_id.is_valid_scheduled() {
            if let Some(peer) = header.reply_to_peer {
                // A scheduled reply can only target its own chat.
                self.report(
                    owner,
                    AnomalyKind::ScheduledReplyInOtherChat,
                    format!("reply to {} in {}", reference.message_id, ChatId::from(peer)),
                );
                reference.message_id = MessageId::None;
            }
            if reference.message_id == owner.message_id {
                self.report(
                    owner,
                    AnomalyKind::SelfReply,
                    format!("reply to {}", reference.message_id),
                );
                reference.message_id = MessageId::None;
            }
        } else {
            self.report(
                owner,
                AnomalyKind::InvalidScheduledTarget,
                format!("reply to {}", reference.message_id),
            );
            reference.message_id = MessageId::None;
        }
        if header.reply_from.is_some() || header.has_media() {
            self.report(
                owner,
                AnomalyKind::ScheduledReplyWithExtras,
                format!("{header:?}"),
            );
        }
    }

    fn normalize_regular(
        &self,
        header: &ReplyHeader,
        owner: &OwnerContext,
        reference: &mut RepliedReference,
    ) {
        if header.reply_to_message_id != 0 {
            reference.message_id = MessageId::Regular {
                id: header.reply_to_message_id,
            };
            if let Some(peer) = header.reply_to_peer {
                let chat_id = ChatId::from(peer);
                if chat_id.is_valid() {
                    // A same-chat marker on the wire is redundant.
                    reference.chat_id = (chat_id != owner.chat_id).then_some(chat_id);
                } else {
                    self.report(owner, AnomalyKind::InvalidPeer, format!("{peer:?}"));
                    reference.message_id = MessageId::None;
                    reference.chat_id = None;
                }
            }
            if reference.message_id != MessageId::None {
                if !reference.message_id.is_valid() {
                    self.report(owner, AnomalyKind::InvalidTargetId, format!("{header:?}"));
                    reference.message_id = MessageId::None;
                    reference.chat_id = None;
                } else if self.violates_causality(reference, owner) {
                    self.report(
                        owner,
                        AnomalyKind::ImpossibleForwardReference,
                        format!("reply to {}", reference.message_id),
                    );
                    reference.message_id = MessageId::None;
                }
            }
        } else if header.reply_to_peer.is_some() {
            self.report(owner, AnomalyKind::DanglingPeer, format!("{header:?}"));
        }

        if let Some(from) = &header.reply_from {
            reference.origin_date = from.date;
            if from.channel_post != 0 {
                self.report(owner, AnomalyKind::ChannelPostOrigin, format!("{from:?}"));
            } else {
                match self.origins.resolve(from) {
                    Ok(origin) => reference.origin = origin,
                    // Unresolvable sender: keep nothing of the origin, the
                    // date alone would claim an attribution we don't have.
                    Err(_) => reference.origin_date = 0,
                }
            }
        }

        if let Some(media) = header.reply_media.as_ref().filter(|media| !media.is_null()) {
            let content = self.codec.decode(media, owner.chat_id);
            if content.is_allowed_in_reply() {
                reference.content = Some(content);
            } else {
                self.report(
                    owner,
                    AnomalyKind::DisallowedContentKind,
                    content.kind_name().to_owned(),
                );
            }
        }
    }

    /// Same-chat replies cannot point at the owning message or, outside
    /// gap-tolerant chats, past it.
    fn violates_causality(&self, reference: &RepliedReference, owner: &OwnerContext) -> bool {
        if owner.message_id.is_scheduled() || reference.chat_id.is_some() {
            return false;
        }
        let past_owner = reference.message_id > owner.message_id
            && !self.sequencing.allows_out_of_order_ids(owner.chat_id);
        past_owner || reference.message_id == owner.message_id
    }

    fn normalize_quote(
        &self,
        header: ReplyHeader,
        _owner: &OwnerContext,
        reference: &mut RepliedReference,
    ) {
        if header.quote_text.is_empty() {
            return;
        }
        reference.is_quote_manual = header.quote_is_manual;
        let entities = self.entities.parse(&header.quote_entities);
        reference.quote =
            match fix_formatted_text(header.quote_text.clone(), entities, &FormatOptions::quote()) {
                Ok(quote) => quote,
                // Keep a best-effort plain-text quote rather than dropping it.
                Err(_) => FormattedText::plain(clean_plain_text(
                    &header.quote_text,
                    QUOTE_LENGTH_MAX,
                )),
            };
    }

    fn report(&self, owner: &OwnerContext, kind: AnomalyKind, detail: String) {
        self.diagnostics.report(Anomaly {
            owner_chat: owner.chat_id,
            owner_message: owner.message_id,
            kind,
            detail,
        });
    }
}
