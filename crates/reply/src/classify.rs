//! Decides whether a re-synced reply reference changed meaningfully.

use chatsync_types::MessageId;

use crate::reference::RepliedReference;

/// Classify the transition from `old` to `new` as meaningful (worth
/// surfacing to consumers) or benign (an expected server-side transition).
///
/// The rules form an ordered decision list; the first match decides. Order
/// carries real precedence: an origin-date change must be caught before the
/// identical-ids fast path.
///
/// `is_reply_to_locally_deleted` answers whether a reference points at a
/// message the local store knows to be deleted; `owner_thread_root` is the
/// root message of the thread the owning message lives in.
pub fn is_meaningful_change(
    old: &RepliedReference,
    new: &RepliedReference,
    owner_thread_root: MessageId,
    is_unsent_local: bool,
    is_reply_to_locally_deleted: impl Fn(&RepliedReference) -> bool,
) -> bool {
    // The publish date of the original message cannot change.
    if old.origin_date != new.origin_date && old.origin_date != 0 && new.origin_date != 0 {
        return true;
    }
    // Only the author signature may change within an origin.
    if old.origin != new.origin
        && !old.origin.has_sender_signature()
        && !new.origin.has_sender_signature()
        && !old.origin.is_empty()
        && !new.origin.is_empty()
    {
        return true;
    }
    // The chat a reply points into cannot change.
    if old.chat_id != new.chat_id && old.chat_id.is_some() && new.chat_id.is_some() {
        return true;
    }
    if old.message_id == new.message_id && old.chat_id == new.chat_id {
        if old.message_id != MessageId::None {
            if old.origin_date != new.origin_date {
                return true;
            }
            if old.origin != new.origin
                && !old.origin.has_sender_signature()
                && !new.origin.has_sender_signature()
            {
                return true;
            }
        }
        return false;
    }
    // A dangling local reply resolving to empty once its target is known
    // deleted.
    if is_unsent_local && is_reply_to_locally_deleted(old) && new.message_id == MessageId::None {
        return false;
    }
    // Symmetric case: the target was deleted locally before sending but was
    // known server-side.
    if is_unsent_local && is_reply_to_locally_deleted(new) && old.message_id == MessageId::None {
        return false;
    }
    // Rescheduling moves the send date but keeps the scheduled server id.
    if old.message_id.is_valid_scheduled()
        && new.message_id.is_valid_scheduled()
        && old.message_id.scheduled_server_id() == new.message_id.scheduled_server_id()
    {
        return false;
    }
    // The reply retargeted to the thread root after its target was deleted.
    if is_unsent_local && owner_thread_root == new.message_id && new.chat_id.is_none() {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use chatsync_types::{ChatId, MessageOrigin};

    use super::*;

    fn never_deleted(_reference: &RepliedReference) -> bool {
        false
    }

    fn reference(message_id: MessageId) -> RepliedReference {
        RepliedReference {
            message_id,
            ..RepliedReference::default()
        }
    }

    fn signed_chat_origin(signature: &str) -> MessageOrigin {
        MessageOrigin::Chat {
            chat_id: ChatId::Group { id: 3 },
            author_signature: signature.into(),
        }
    }

    #[test]
    fn origin_date_change_is_meaningful() {
        let old = RepliedReference {
            origin_date: 1000,
            ..reference(MessageId::Regular { id: 10 })
        };
        let new = RepliedReference {
            origin_date: 2000,
            ..reference(MessageId::Regular { id: 10 })
        };
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn signature_only_origin_change_is_benign() {
        let old = RepliedReference {
            origin_date: 1000,
            origin: signed_chat_origin("alice"),
            ..reference(MessageId::Regular { id: 10 })
        };
        let new = RepliedReference {
            origin: signed_chat_origin("bob"),
            ..old.clone()
        };
        assert!(!is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn unsigned_origin_change_is_meaningful() {
        let old = RepliedReference {
            origin: MessageOrigin::User { user_id: 1 },
            ..reference(MessageId::Regular { id: 10 })
        };
        let new = RepliedReference {
            origin: MessageOrigin::User { user_id: 2 },
            ..reference(MessageId::Regular { id: 10 })
        };
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn chat_change_is_meaningful() {
        let old = RepliedReference {
            chat_id: Some(ChatId::Channel { id: 1 }),
            ..reference(MessageId::Regular { id: 10 })
        };
        let new = RepliedReference {
            chat_id: Some(ChatId::Channel { id: 2 }),
            ..reference(MessageId::Regular { id: 10 })
        };
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn identical_target_with_quote_change_is_benign() {
        let old = reference(MessageId::Regular { id: 10 });
        let mut new = reference(MessageId::Regular { id: 10 });
        new.is_quote_manual = true;
        assert!(!is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn identical_target_losing_its_origin_date_is_meaningful() {
        // Rule 1 does not fire when one side is zero; the identical-ids path
        // still must.
        let old = RepliedReference {
            origin_date: 1000,
            ..reference(MessageId::Regular { id: 10 })
        };
        let new = reference(MessageId::Regular { id: 10 });
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn deleted_target_resolving_to_empty_is_benign() {
        let old = reference(MessageId::Regular { id: 5 });
        let new = RepliedReference::default();
        assert!(!is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            true,
            |info| info.message_id == MessageId::Regular { id: 5 }
        ));
        // Not for an already-sent message though.
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            |info| info.message_id == MessageId::Regular { id: 5 }
        ));
    }

    #[test]
    fn locally_deleted_unsent_target_appearing_server_side_is_benign() {
        let old = RepliedReference::default();
        let new = reference(MessageId::Regular { id: 5 });
        assert!(!is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            true,
            |info| info.message_id == MessageId::Regular { id: 5 }
        ));
    }

    #[test]
    fn reschedule_of_the_same_scheduled_target_is_benign() {
        let old = reference(MessageId::Scheduled {
            server_id: 9,
            send_date: 100,
        });
        let new = reference(MessageId::Scheduled {
            server_id: 9,
            send_date: 200,
        });
        assert!(!is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));

        let other = reference(MessageId::Scheduled {
            server_id: 8,
            send_date: 200,
        });
        assert!(is_meaningful_change(
            &old,
            &other,
            MessageId::None,
            false,
            never_deleted
        ));
    }

    #[test]
    fn retarget_to_thread_root_is_benign_for_unsent_replies() {
        let root = MessageId::Regular { id: 2 };
        let old = reference(MessageId::Regular { id: 5 });
        let new = reference(root);
        assert!(!is_meaningful_change(&old, &new, root, true, never_deleted));
        assert!(is_meaningful_change(&old, &new, root, false, never_deleted));
    }

    #[test]
    fn plain_retarget_is_meaningful() {
        let old = reference(MessageId::Regular { id: 5 });
        let new = reference(MessageId::Regular { id: 6 });
        assert!(is_meaningful_change(
            &old,
            &new,
            MessageId::None,
            false,
            never_deleted
        ));
    }
}
