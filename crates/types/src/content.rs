use serde::{Deserialize, Serialize};

use crate::chat::ChatId;

/// A frozen snapshot of a message's media, used for reply previews.
///
/// The payload carried per kind is the minimum the pipeline needs for
/// preview display and dependency tracking; full media resolution stays with
/// the content codec that produced the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSnapshot {
    Animation { file_id: String },
    Audio { file_id: String },
    Contact { user_id: i64, phone_number: String },
    Dice { emoji: String, value: i32 },
    Document { file_id: String },
    Game { bot_user_id: i64, short_name: String },
    Giveaway { boosted_chat_ids: Vec<ChatId> },
    Invoice { title: String, currency: String },
    Location { latitude: f64, longitude: f64 },
    Photo { file_id: String },
    Poll { poll_id: i64, question: String },
    Sticker { file_id: String },
    Story { chat_id: ChatId, story_id: i64 },
    Unsupported,
    Venue { title: String, address: String },
    Video { file_id: String },
    VideoNote { file_id: String },
    VoiceNote { file_id: String },
    // Kinds a codec can produce but which never belong in a reply snapshot.
    Text { text: String },
    LiveLocation { latitude: f64, longitude: f64 },
    ExpiredPhoto,
    ExpiredVideo,
}

impl ContentSnapshot {
    /// Whether this content kind may be kept as a reply preview snapshot.
    ///
    /// Plain text, live locations, and expired-media placeholders are
    /// excluded; everything else the codec can produce is allowed.
    pub fn is_allowed_in_reply(&self) -> bool {
        match self {
            Self::Animation { .. }
            | Self::Audio { .. }
            | Self::Contact { .. }
            | Self::Dice { .. }
            | Self::Document { .. }
            | Self::Game { .. }
            | Self::Giveaway { .. }
            | Self::Invoice { .. }
            | Self::Location { .. }
            | Self::Photo { .. }
            | Self::Poll { .. }
            | Self::Sticker { .. }
            | Self::Story { .. }
            | Self::Unsupported
            | Self::Venue { .. }
            | Self::Video { .. }
            | Self::VideoNote { .. }
            | Self::VoiceNote { .. } => true,
            Self::Text { .. }
            | Self::LiveLocation { .. }
            | Self::ExpiredPhoto
            | Self::ExpiredVideo => false,
        }
    }

    /// Kind name for diagnostics and logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Animation { .. } => "animation",
            Self::Audio { .. } => "audio",
            Self::Contact { .. } => "contact",
            Self::Dice { .. } => "dice",
            Self::Document { .. } => "document",
            Self::Game { .. } => "game",
            Self::Giveaway { .. } => "giveaway",
            Self::Invoice { .. } => "invoice",
            Self::Location { .. } => "location",
            Self::Photo { .. } => "photo",
            Self::Poll { .. } => "poll",
            Self::Sticker { .. } => "sticker",
            Self::Story { .. } => "story",
            Self::Unsupported => "unsupported",
            Self::Venue { .. } => "venue",
            Self::Video { .. } => "video",
            Self::VideoNote { .. } => "video_note",
            Self::VoiceNote { .. } => "voice_note",
            Self::Text { .. } => "text",
            Self::LiveLocation { .. } => "live_location",
            Self::ExpiredPhoto => "expired_photo",
            Self::ExpiredVideo => "expired_video",
        }
    }
}
