//! Dependency registration: which externally-owned entities a reference
//! touches.

use chatsync_types::{ContentSnapshot, MessageOrigin, TextEntityKind};

use crate::{capabilities::DependencyCollector, reference::RepliedReference};

impl RepliedReference {
    /// Register every chat, user, and story this reference depends on.
    ///
    /// `is_bot` narrows the registration to what matters for a bot-owned
    /// context; bots never render poll previews, so poll targets are skipped
    /// for them.
    pub fn add_dependencies(&self, collector: &mut dyn DependencyCollector, is_bot: bool) {
        if let Some(chat_id) = self.chat_id {
            collector.add_chat_and_dependencies(chat_id);
        }
        match &self.origin {
            MessageOrigin::None | MessageOrigin::HiddenUser { .. } => {},
            MessageOrigin::User { user_id } => collector.add_user(*user_id),
            MessageOrigin::Chat { chat_id, .. } | MessageOrigin::Channel { chat_id, .. } => {
                collector.add_chat_and_dependencies(*chat_id);
            },
        }
        for entity in &self.quote.entities {
            if let TextEntityKind::MentionName { user_id } = entity.kind {
                collector.add_user(user_id);
            }
        }
        if let Some(content) = &self.content {
            add_content_dependencies(content, collector, is_bot);
        }
    }
}

fn add_content_dependencies(
    content: &ContentSnapshot,
    collector: &mut dyn DependencyCollector,
    is_bot: bool,
) {
    match content {
        ContentSnapshot::Contact { user_id, .. } => collector.add_user(*user_id),
        ContentSnapshot::Game { bot_user_id, .. } => collector.add_user(*bot_user_id),
        ContentSnapshot::Giveaway { boosted_chat_ids } => {
            for chat_id in boosted_chat_ids {
                collector.add_chat_and_dependencies(*chat_id);
            }
        },
        ContentSnapshot::Story { chat_id, story_id } => {
            collector.add_chat_and_dependencies(*chat_id);
            collector.add_story(*chat_id, *story_id);
        },
        ContentSnapshot::Poll { poll_id, .. } => {
            // Poll state is tracked per-client; bots have no use for it.
            if !is_bot {
                collector.add_poll(*poll_id);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use chatsync_types::{ChatId, FormattedText, MessageId, TextEntity};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        chats: Vec<ChatId>,
        users: Vec<i64>,
        stories: Vec<(ChatId, i64)>,
        polls: Vec<i64>,
    }

    impl DependencyCollector for Recorder {
        fn add_chat_and_dependencies(&mut self, chat_id: ChatId) {
            self.chats.push(chat_id);
        }

        fn add_user(&mut self, user_id: i64) {
            self.users.push(user_id);
        }

        fn add_story(&mut self, chat_id: ChatId, story_id: i64) {
            self.stories.push((chat_id, story_id));
        }

        fn add_poll(&mut self, poll_id: i64) {
            self.polls.push(poll_id);
        }
    }

    #[test]
    fn registers_chat_origin_quote_and_content_entities() {
        let reference = RepliedReference {
            message_id: MessageId::Regular { id: 4 },
            chat_id: Some(ChatId::Channel { id: 11 }),
            origin: MessageOrigin::User { user_id: 21 },
            quote: FormattedText {
                text: "ping @someone".into(),
                entities: vec![TextEntity {
                    kind: TextEntityKind::MentionName { user_id: 31 },
                    offset: 5,
                    length: 8,
                }],
            },
            content: Some(ContentSnapshot::Story {
                chat_id: ChatId::Channel { id: 41 },
                story_id: 5,
            }),
            ..RepliedReference::default()
        };

        let mut recorder = Recorder::default();
        reference.add_dependencies(&mut recorder, false);
        assert_eq!(
            recorder.chats,
            vec![ChatId::Channel { id: 11 }, ChatId::Channel { id: 41 }]
        );
        assert_eq!(recorder.users, vec![21, 31]);
        assert_eq!(recorder.stories, vec![(ChatId::Channel { id: 41 }, 5)]);
    }

    #[test]
    fn poll_registration_is_skipped_for_bots() {
        let reference = RepliedReference {
            message_id: MessageId::Regular { id: 4 },
            content: Some(ContentSnapshot::Poll {
                poll_id: 77,
                question: "really?".into(),
            }),
            ..RepliedReference::default()
        };

        let mut recorder = Recorder::default();
        reference.add_dependencies(&mut recorder, false);
        assert_eq!(recorder.polls, vec![77]);

        let mut recorder = Recorder::default();
        reference.add_dependencies(&mut recorder, true);
        assert!(recorder.polls.is_empty());
    }

    #[test]
    fn empty_reference_registers_nothing() {
        let mut recorder = Recorder::default();
        RepliedReference::default().add_dependencies(&mut recorder, true);
        assert!(recorder.chats.is_empty());
        assert!(recorder.users.is_empty());
        assert!(recorder.stories.is_empty());
    }
}
