use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Delivery state of a message.
///
/// Only `Sent` and `PendingApproval` are produced in a session. `Approved`
/// and `Rejected` are reserved for a moderation backend that does not exist
/// yet; they deserialize from datasets but nothing transitions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Sent,
    PendingApproval,
    Approved,
    Rejected,
}

impl MessageStatus {
    pub fn is_pending(self) -> bool {
        self == Self::PendingApproval
    }

    /// True for the two reserved moderation outcomes.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::PendingApproval => "pending approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// How a composed message enters the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    Direct,
    ForApproval,
}

impl ComposeMode {
    pub fn initial_status(self) -> MessageStatus {
        match self {
            Self::Direct => MessageStatus::Sent,
            Self::ForApproval => MessageStatus::PendingApproval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub status: MessageStatus,
}

impl Message {
    pub fn is_from(&self, identity: &str) -> bool {
        self.sender == identity
    }

    /// Counts toward the viewer's unread total.
    pub fn is_unread_for(&self, viewer: &str) -> bool {
        !self.is_from(viewer) && !self.read && !self.status.is_pending()
    }
}
