//! Reply-reference normalization core.
//!
//! Turns the untrusted reply header of a wire-received message into a
//! validated [`RepliedReference`] value, and decides whether two successive
//! versions of that value differ meaningfully. Wire data comes from a remote
//! peer and is frequently internally inconsistent, so normalization is total:
//! anomalies degrade the offending field to empty and are reported to an
//! injected diagnostic sink, never to the caller as an error.
//!
//! Content decoding, origin resolution, and entity parsing belong to the
//! surrounding pipeline and are injected through the narrow traits in
//! [`capabilities`].

pub mod capabilities;
pub mod classify;
mod deps;
pub mod diagnostics;
pub mod normalize;
pub mod project;
pub mod reference;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use {
    capabilities::{
        ContentCodec, ContentDelta, DependencyCollector, OriginResolver, ProjectedContent,
        SequencingPolicy, SessionCountPolicy, TextEntityParser,
    },
    classify::is_meaningful_change,
    diagnostics::{Anomaly, AnomalyKind, DiagnosticSink, RecordingSink, TracingSink},
    normalize::{OwnerContext, ReplyNormalizer},
    project::ReplyToMessage,
    reference::RepliedReference,
    wire::{PeerRef, ReplyHeader, WireOrigin},
};
