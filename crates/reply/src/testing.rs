//! Shared capability stubs for unit tests.

use chatsync_types::{ChatId, ContentSnapshot, MessageOrigin, TextEntity, TextEntityKind};

use crate::{
    capabilities::{
        ContentCodec, ContentDelta, OriginResolver, ProjectedContent, SequencingPolicy,
        TextEntityParser,
    },
    wire::WireOrigin,
};

/// Resolves every wire origin to a fixed value.
pub struct StubOrigins(pub MessageOrigin);

impl OriginResolver for StubOrigins {
    fn resolve(&self, _origin: &WireOrigin) -> anyhow::Result<MessageOrigin> {
        Ok(self.0.clone())
    }
}

/// Fails to resolve any wire origin.
pub struct FailingOrigins;

impl OriginResolver for FailingOrigins {
    fn resolve(&self, _origin: &WireOrigin) -> anyhow::Result<MessageOrigin> {
        anyhow::bail!("unknown sender")
    }
}

/// Parses no entities.
pub struct NoEntities;

impl TextEntityParser for NoEntities {
    fn parse(&self, _raw: &[serde_json::Value]) -> Vec<TextEntity> {
        Vec::new()
    }
}

/// Parses `{"offset", "length"}` records into bold entities.
pub struct SplitEntities;

impl TextEntityParser for SplitEntities {
    fn parse(&self, raw: &[serde_json::Value]) -> Vec<TextEntity> {
        raw.iter()
            .filter_map(|record| {
                let offset = record.get("offset")?.as_u64()? as usize;
                let length = record.get("length")?.as_u64()? as usize;
                Some(TextEntity {
                    kind: TextEntityKind::Bold,
                    offset,
                    length,
                })
            })
            .collect()
    }
}

/// Sequencing policy with a fixed answer.
pub struct FixedSequencing(pub bool);

impl SequencingPolicy for FixedSequencing {
    fn allows_out_of_order_ids(&self, _chat_id: ChatId) -> bool {
        self.0
    }
}

pub fn never_out_of_order() -> FixedSequencing {
    FixedSequencing(false)
}

pub fn always_out_of_order() -> FixedSequencing {
    FixedSequencing(true)
}

/// Content codec with configurable decode result and comparison verdict.
#[derive(Default)]
pub struct StubCodec {
    pub decoded: Option<ContentSnapshot>,
    pub delta: ContentDelta,
    pub refetch: bool,
}

impl StubCodec {
    pub fn with_delta(needs_update: bool, is_changed: bool) -> Self {
        Self {
            delta: ContentDelta {
                needs_update,
                is_changed,
            },
            ..Self::default()
        }
    }

    pub fn decoding(content: ContentSnapshot) -> Self {
        Self {
            decoded: Some(content),
            ..Self::default()
        }
    }
}

impl ContentCodec for StubCodec {
    fn decode(&self, _media: &serde_json::Value, _chat_id: ChatId) -> ContentSnapshot {
        self.decoded.clone().unwrap_or(ContentSnapshot::Unsupported)
    }

    fn compare(
        &self,
        _old: Option<&ContentSnapshot>,
        _new: Option<&ContentSnapshot>,
    ) -> ContentDelta {
        self.delta
    }

    fn needs_refetch(&self, _content: &ContentSnapshot) -> bool {
        self.refetch
    }

    fn project(&self, content: &ContentSnapshot, _chat_id: ChatId) -> ProjectedContent {
        match content {
            ContentSnapshot::Unsupported => ProjectedContent::Unsupported,
            other => ProjectedContent::Rendered {
                content: serde_json::json!({"kind": other.kind_name()}),
            },
        }
    }
}
