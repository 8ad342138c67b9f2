use serde::{Deserialize, Serialize};

use thiserror::Error;

/// Longest quote excerpt accepted from a reply header, in chars.
pub const QUOTE_LENGTH_MAX: usize = 1024;

/// Rich-text markup kinds attachable to a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextEntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre { language: String },
    TextUrl { url: String },
    MentionName { user_id: i64 },
    CustomEmoji { custom_emoji_id: i64 },
    Blockquote,
}

impl TextEntityKind {
    /// Entities that reference server-side custom assets. Only allowed where
    /// the caller opts in.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::CustomEmoji { .. })
    }
}

/// A markup entity covering `length` chars starting at char `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntity {
    pub kind: TextEntityKind,
    pub offset: usize,
    pub length: usize,
}

impl TextEntity {
    fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Text with rich-text entities. Entities are kept sorted by offset and are
/// either disjoint or properly nested once the text has gone through
/// [`fix_formatted_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    pub text: String,
    pub entities: Vec<TextEntity>,
}

impl FormattedText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("text is too long: {length} chars, at most {max} allowed")]
    TooLong { length: usize, max: usize },
    #[error("entity covers chars {offset}..{end} outside of text of {length} chars")]
    EntityOutOfBounds {
        offset: usize,
        end: usize,
        length: usize,
    },
    #[error("entity at char {offset} is empty")]
    EmptyEntity { offset: usize },
    #[error("entities at chars {first} and {second} overlap without nesting")]
    OverlappingEntities { first: usize, second: usize },
    #[error("custom entities are not allowed here")]
    CustomEntityNotAllowed,
}

/// Knobs for [`fix_formatted_text`], per length class of the field being
/// sanitized.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub allow_custom_entities: bool,
    pub max_length: usize,
}

impl FormatOptions {
    /// Options for quote excerpts carried in reply headers.
    pub fn quote() -> Self {
        Self {
            allow_custom_entities: true,
            max_length: QUOTE_LENGTH_MAX,
        }
    }
}

/// Validate and canonicalize text with entities.
///
/// Entity offsets are checked against the text bounds, zero-length and
/// overlapping-but-not-nested entities are rejected, custom entities are
/// rejected unless allowed, surrounding whitespace is trimmed with entity
/// offsets shifted accordingly, and the result is length-checked.
pub fn fix_formatted_text(
    text: String,
    mut entities: Vec<TextEntity>,
    options: &FormatOptions,
) -> Result<FormattedText, TextError> {
    let char_len = text.chars().count();

    for entity in &entities {
        if entity.length == 0 {
            return Err(TextError::EmptyEntity {
                offset: entity.offset,
            });
        }
        if entity.end() > char_len {
            return Err(TextError::EntityOutOfBounds {
                offset: entity.offset,
                end: entity.end(),
                length: char_len,
            });
        }
        if entity.kind.is_custom() && !options.allow_custom_entities {
            return Err(TextError::CustomEntityNotAllowed);
        }
    }

    // Sort by start, longest first, so containment checks see outer entities
    // before the entities nested inside them.
    entities.sort_by(|a, b| {
        a.offset
            .cmp(&b.offset)
            .then_with(|| b.length.cmp(&a.length))
    });
    let mut open: Vec<&TextEntity> = Vec::new();
    for entity in &entities {
        while open
            .last()
            .is_some_and(|outer| outer.end() <= entity.offset)
        {
            open.pop();
        }
        if let Some(outer) = open.last() {
            if entity.end() > outer.end() {
                return Err(TextError::OverlappingEntities {
                    first: outer.offset,
                    second: entity.offset,
                });
            }
        }
        open.push(entity);
    }

    // Trim surrounding whitespace, shifting entities into the trimmed frame
    // and dropping any that end up empty.
    let leading = text.chars().take_while(|c| c.is_whitespace()).count();
    let trimmed: String = if leading == char_len {
        String::new()
    } else {
        text.trim().to_owned()
    };
    let trimmed_len = trimmed.chars().count();
    let entities: Vec<TextEntity> = entities
        .into_iter()
        .filter_map(|entity| {
            let start = entity.offset.saturating_sub(leading);
            let end = entity.end().saturating_sub(leading).min(trimmed_len);
            (end > start).then_some(TextEntity {
                kind: entity.kind,
                offset: start,
                length: end - start,
            })
        })
        .collect();

    if trimmed_len > options.max_length {
        return Err(TextError::TooLong {
            length: trimmed_len,
            max: options.max_length,
        });
    }

    Ok(FormattedText {
        text: trimmed,
        entities,
    })
}

/// Best-effort plain-text cleanup for input that failed full sanitization.
///
/// Strips control characters (newlines survive), trims surrounding
/// whitespace, and truncates to `max_length` chars. Never fails; entities are
/// the caller's loss.
pub fn clean_plain_text(text: &str, max_length: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect();
    cleaned.trim().chars().take(max_length).collect()
}
