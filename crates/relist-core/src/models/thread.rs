use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Message, Timestamp};
use crate::constants::DEFAULT_LISTING_TITLE;

/// A conversation between exactly two identities about one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub thread_id: String,
    /// Fixed-size so a dataset entry with any other participant count fails to parse.
    pub participants: [String; 2],
    #[serde(default = "default_listing_title")]
    pub listing_title: String,
    #[serde(default)]
    pub listing_price: Option<f64>,
    #[serde(default)]
    pub listing_id: Option<String>,
    /// Display names keyed by identity, when the dataset provides them
    #[serde(default)]
    pub participant_names: HashMap<String, String>,
    /// Append-only; insertion order is chronological order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// When the thread was started in this session; orders it until a message arrives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

fn default_listing_title() -> String {
    DEFAULT_LISTING_TITLE.to_string()
}

impl Conversation {
    pub fn new(thread_id: String, participants: [String; 2], listing_title: String) -> Self {
        Self {
            thread_id,
            participants,
            listing_title,
            listing_price: None,
            listing_id: None,
            participant_names: HashMap::new(),
            messages: Vec::new(),
            created_at: None,
        }
    }

    pub fn involves(&self, identity: &str) -> bool {
        self.participants.iter().any(|p| p == identity)
    }

    /// The other participant from the viewer's perspective.
    ///
    /// If the viewer is not a participant the first participant is returned.
    pub fn counterpart(&self, viewer: &str) -> &str {
        if self.participants[0] == viewer {
            &self.participants[1]
        } else {
            &self.participants[0]
        }
    }

    /// Display name for the counterpart, falling back to the identity itself.
    pub fn counterpart_name(&self, viewer: &str) -> &str {
        let counterpart = self.counterpart(viewer);
        self.participant_names
            .get(counterpart)
            .map(String::as_str)
            .unwrap_or(counterpart)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_timestamp(&self) -> Option<&Timestamp> {
        self.last_message().map(|m| &m.timestamp)
    }

    /// Ordering key for the conversation list.
    ///
    /// Empty threads fall back to `created_at`, and sort as epoch 0 without it.
    pub fn last_activity_key(&self) -> i64 {
        self.last_timestamp()
            .or(self.created_at.as_ref())
            .map(Timestamp::sort_key)
            .unwrap_or(0)
    }

    pub fn unread_count(&self, viewer: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| m.is_unread_for(viewer))
            .count()
    }

    /// Short preview of the last message for list rows.
    pub fn preview(&self, max_chars: usize) -> String {
        self.last_message()
            .map(|m| m.content.chars().take(max_chars).collect::<String>().replace('\n', " "))
            .unwrap_or_default()
    }
}
