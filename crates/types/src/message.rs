use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Scheduled server ids live in a small dedicated range; anything outside it
/// cannot have been assigned by the server.
pub const SCHEDULED_SERVER_ID_MAX: i64 = 1 << 18;

/// Identity of a message as seen by the client.
///
/// A message either has no identity yet, a permanent server-assigned id, or a
/// scheduled-message id paired with the date it is due to be published.
/// Scheduled ids are only unique together with their send date: rescheduling
/// a message changes the date but keeps the server id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageId {
    #[default]
    None,
    Regular { id: i64 },
    Scheduled { server_id: i64, send_date: i64 },
}

impl MessageId {
    /// A structurally valid permanent server id.
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Regular { id } if id > 0)
    }

    /// A structurally valid scheduled id.
    pub fn is_valid_scheduled(self) -> bool {
        match self {
            Self::Scheduled {
                server_id,
                send_date,
            } => server_id > 0 && server_id < SCHEDULED_SERVER_ID_MAX && send_date > 0,
            _ => false,
        }
    }

    pub fn is_scheduled(self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The underlying server id of a scheduled identity, independent of the
    /// send date. Rescheduling keeps this id stable.
    pub fn scheduled_server_id(self) -> Option<i64> {
        match self {
            Self::Scheduled { server_id, .. } => Some(server_id),
            _ => None,
        }
    }
}

/// Ordering is only defined between identities of the same kind. Regular ids
/// order by server id (monotonic per chat); scheduled ids order by send date,
/// then server id. Everything else is unordered.
impl PartialOrd for MessageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::None, Self::None) => Some(Ordering::Equal),
            (Self::Regular { id: a }, Self::Regular { id: b }) => Some(a.cmp(b)),
            (
                Self::Scheduled {
                    server_id: a_id,
                    send_date: a_date,
                },
                Self::Scheduled {
                    server_id: b_id,
                    send_date: b_date,
                },
            ) => Some((a_date, a_id).cmp(&(b_date, b_id))),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "message 0"),
            Self::Regular { id } => write!(f, "message {id}"),
            Self::Scheduled {
                server_id,
                send_date,
            } => write!(f, "scheduled message {server_id} at {send_date}"),
        }
    }
}
