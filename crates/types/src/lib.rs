//! Shared value vocabulary for the chatsync message pipeline.
//!
//! Message and chat identities, sender origins, formatted text with rich
//! entities, and frozen content snapshots. Everything here is a plain
//! immutable value with no I/O; the reply core and the rest of the pipeline
//! build on these types.

pub mod chat;
pub mod content;
pub mod message;
pub mod origin;
pub mod text;

pub use {
    chat::{ChatId, ChatKind},
    content::ContentSnapshot,
    message::MessageId,
    origin::MessageOrigin,
    text::{
        FormatOptions, FormattedText, TextEntity, TextEntityKind, TextError, clean_plain_text,
        fix_formatted_text,
    },
};
