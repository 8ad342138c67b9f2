//! Anomaly reporting for malformed wire data.
//!
//! Normalization never fails; inconsistent input degrades to empty fields
//! and produces an [`Anomaly`] record through an injected sink. This keeps
//! the normalizer a pure function of (input, capabilities) while embedders
//! choose where the records go.

use std::sync::Mutex;

use chatsync_types::{ChatId, MessageId};

/// What went wrong with a reply header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Scheduled target id outside the valid scheduled range.
    InvalidScheduledTarget,
    /// Scheduled reply claiming to target another chat.
    ScheduledReplyInOtherChat,
    /// Scheduled reply carrying origin or media fields.
    ScheduledReplyWithExtras,
    /// A message referencing itself as its reply target.
    SelfReply,
    /// Target id outside the valid server-id range.
    InvalidTargetId,
    /// Cross-chat reference naming an invalid peer.
    InvalidPeer,
    /// Cross-chat reference with no target message id.
    DanglingPeer,
    /// Same-chat reply to a message that cannot exist yet.
    ImpossibleForwardReference,
    /// Cross-context origin claiming to be a channel post.
    ChannelPostOrigin,
    /// Reply media of a kind not allowed in a reply snapshot.
    DisallowedContentKind,
}

impl AnomalyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidScheduledTarget => "invalid_scheduled_target",
            Self::ScheduledReplyInOtherChat => "scheduled_reply_in_other_chat",
            Self::ScheduledReplyWithExtras => "scheduled_reply_with_extras",
            Self::SelfReply => "self_reply",
            Self::InvalidTargetId => "invalid_target_id",
            Self::InvalidPeer => "invalid_peer",
            Self::DanglingPeer => "dangling_peer",
            Self::ImpossibleForwardReference => "impossible_forward_reference",
            Self::ChannelPostOrigin => "channel_post_origin",
            Self::DisallowedContentKind => "disallowed_content_kind",
        }
    }
}

/// One anomaly record: which owning message produced it, what kind, and the
/// offending raw fragment for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub owner_chat: ChatId,
    pub owner_message: MessageId,
    pub kind: AnomalyKind,
    pub detail: String,
}

/// Where anomaly records go.
pub trait DiagnosticSink {
    fn report(&self, anomaly: Anomaly);
}

/// Sink that emits structured `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, anomaly: Anomaly) {
        tracing::warn!(
            kind = anomaly.kind.as_str(),
            owner_chat = %anomaly.owner_chat,
            owner_message = %anomaly.owner_message,
            detail = %anomaly.detail,
            "malformed reply header"
        );
    }
}

/// Append-only in-memory sink, for tests and batch inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Anomaly>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all recorded anomalies.
    pub fn take(&self) -> Vec<Anomaly> {
        match self.records.lock() {
            Ok(mut records) => std::mem::take(&mut *records),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Kinds recorded so far, in report order.
    pub fn kinds(&self) -> Vec<AnomalyKind> {
        match self.records.lock() {
            Ok(records) => records.iter().map(|a| a.kind).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|a| a.kind).collect(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, anomaly: Anomaly) {
        match self.records.lock() {
            Ok(mut records) => records.push(anomaly),
            Err(poisoned) => poisoned.into_inner().push(anomaly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_report_order() {
        let sink = RecordingSink::new();
        let owner_chat = ChatId::Group { id: 5 };
        let owner_message = MessageId::Regular { id: 40 };
        for kind in [AnomalyKind::SelfReply, AnomalyKind::DanglingPeer] {
            sink.report(Anomaly {
                owner_chat,
                owner_message,
                kind,
                detail: String::new(),
            });
        }
        assert_eq!(
            sink.kinds(),
            vec![AnomalyKind::SelfReply, AnomalyKind::DanglingPeer]
        );
        assert_eq!(sink.take().len(), 2);
        assert!(sink.take().is_empty());
    }
}
