//! Capability seams to the surrounding pipeline.
//!
//! Every trait here is a synchronous in-memory lookup against already-loaded
//! state; implementations must not block or perform network I/O. When a
//! lookup cannot be answered, the caller fails safe (treats the field as
//! absent) instead of suspending.

use {
    chatsync_types::{ChatId, ContentSnapshot, MessageOrigin, TextEntity},
    serde::Serialize,
};

use crate::wire::WireOrigin;

/// Resolves raw sender attribution into a [`MessageOrigin`].
pub trait OriginResolver {
    fn resolve(&self, origin: &WireOrigin) -> anyhow::Result<MessageOrigin>;
}

/// Comparison verdict for two content snapshots.
///
/// The two signals are independent and both are surfaced: some callers act
/// on "needs update" (a refetch would produce newer data) separately from
/// "is changed" (the values themselves differ).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentDelta {
    pub needs_update: bool,
    pub is_changed: bool,
}

impl ContentDelta {
    /// Contents are equal only when neither signal fires.
    pub fn is_equal(self) -> bool {
        !self.needs_update && !self.is_changed
    }
}

/// Client-facing rendering of a content snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectedContent {
    /// The snapshot has no client-facing rendering; projection omits it.
    Unsupported,
    Rendered { content: serde_json::Value },
}

/// Decodes, compares, and projects message content on behalf of the reply
/// core. Content semantics live entirely with the implementation; the core
/// only applies kind filtering and equality policy.
pub trait ContentCodec {
    /// Materialize a snapshot from a raw wire media payload. Total: unknown
    /// payloads decode to [`ContentSnapshot::Unsupported`].
    fn decode(&self, media: &serde_json::Value, chat_id: ChatId) -> ContentSnapshot;

    /// Compare two optional snapshots.
    fn compare(
        &self,
        old: Option<&ContentSnapshot>,
        new: Option<&ContentSnapshot>,
    ) -> ContentDelta;

    /// Whether a snapshot is stale enough that the owning message should be
    /// refetched from the server.
    fn needs_refetch(&self, content: &ContentSnapshot) -> bool;

    /// Render a snapshot for the client API.
    fn project(&self, content: &ContentSnapshot, chat_id: ChatId) -> ProjectedContent;
}

/// Parses raw wire entity records into text entities. Unparseable records
/// are dropped, not errors.
pub trait TextEntityParser {
    fn parse(&self, raw: &[serde_json::Value]) -> Vec<TextEntity>;
}

/// Whether a chat may legitimately show message ids out of order.
///
/// This guards the normalizer's causality check. The boundary is a heuristic
/// against known server races, not a protocol guarantee, so it stays
/// pluggable rather than hard-coded on chat type.
pub trait SequencingPolicy {
    fn allows_out_of_order_ids(&self, chat_id: ChatId) -> bool;
}

/// Default sequencing policy: one-to-one and basic group chats tolerate
/// out-of-order ids while more than one session is active; channel and
/// secret chats never do.
#[derive(Debug, Clone, Copy)]
pub struct SessionCountPolicy {
    pub session_count: u32,
}

impl SequencingPolicy for SessionCountPolicy {
    fn allows_out_of_order_ids(&self, chat_id: ChatId) -> bool {
        use chatsync_types::ChatKind;

        match chat_id.kind() {
            ChatKind::User | ChatKind::Group => self.session_count > 1,
            ChatKind::Channel | ChatKind::Secret => false,
        }
    }
}

/// Collects the externally-owned entities a reference touches, for cache
/// and consistency registration.
pub trait DependencyCollector {
    /// Register a chat plus its transitive dependencies.
    fn add_chat_and_dependencies(&mut self, chat_id: ChatId);

    /// Register a user.
    fn add_user(&mut self, user_id: i64);

    /// Register a story.
    fn add_story(&mut self, chat_id: ChatId, story_id: i64);

    /// Register a poll.
    fn add_poll(&mut self, poll_id: i64);
}
