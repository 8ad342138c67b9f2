use serde::{Deserialize, Serialize};

/// The four chat flavors the pipeline distinguishes. Delivery and ordering
/// guarantees differ per kind, which is why some policies branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    User,
    Group,
    Channel,
    Secret,
}

/// Identity of a chat: its kind plus a server-assigned numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatId {
    User { id: i64 },
    Group { id: i64 },
    Channel { id: i64 },
    Secret { id: i64 },
}

impl ChatId {
    pub fn kind(self) -> ChatKind {
        match self {
            Self::User { .. } => ChatKind::User,
            Self::Group { .. } => ChatKind::Group,
            Self::Channel { .. } => ChatKind::Channel,
            Self::Secret { .. } => ChatKind::Secret,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Self::User { id } | Self::Group { id } | Self::Channel { id } | Self::Secret { id } => {
                id
            },
        }
    }

    pub fn is_valid(self) -> bool {
        self.id() > 0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User { id } => write!(f, "user chat {id}"),
            Self::Group { id } => write!(f, "group chat {id}"),
            Self::Channel { id } => write!(f, "channel chat {id}"),
            Self::Secret { id } => write!(f, "secret chat {id}"),
        }
    }
}
