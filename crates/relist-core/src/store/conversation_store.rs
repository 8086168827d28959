use thiserror::Error;
use uuid::Uuid;

use super::fixtures::Dataset;
use super::unread;
use crate::models::{Conversation, Message, Timestamp};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),
    #[error("No signed-in viewer")]
    NoViewer,
    #[error("Cannot start a conversation with yourself")]
    SelfConversation,
    #[error("Counterpart identity is blank")]
    InvalidCounterpart,
}

/// Listing a new conversation is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingContext {
    pub listing_id: Option<String>,
    pub title: String,
    pub price: Option<f64>,
}

/// Conversation list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationFilter {
    /// Case-insensitive match on listing title, counterpart identity or name
    pub query: String,
    pub unread_only: bool,
}

impl ConversationFilter {
    pub fn search(query: &str) -> Self {
        Self {
            query: query.to_string(),
            unread_only: false,
        }
    }

    fn matches(&self, thread: &Conversation, viewer: &str) -> bool {
        if self.unread_only && thread.unread_count(viewer) == 0 {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        thread.listing_title.to_lowercase().contains(&query)
            || thread.counterpart(viewer).to_lowercase().contains(&query)
            || thread.counterpart_name(viewer).to_lowercase().contains(&query)
    }
}

/// In-memory conversations for one viewer, owned by a single session.
///
/// Populated once from a dataset and dropped with the session.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    viewer: Option<String>,
    threads: Vec<Conversation>,
}

fn sort_by_last_activity(threads: &mut [Conversation]) {
    // Stable, so ties keep dataset order.
    threads.sort_by_key(|t| std::cmp::Reverse(t.last_activity_key()));
}

impl ConversationStore {
    /// Store with no viewer and no threads.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Threads of `dataset` that involve `identity`, most recent first.
    pub fn load(dataset: &Dataset, identity: &str) -> Self {
        let identity = identity.trim();
        if identity.is_empty() {
            return Self::empty();
        }

        let mut threads: Vec<Conversation> = dataset
            .conversations
            .iter()
            .filter(|t| t.involves(identity))
            .cloned()
            .collect();
        sort_by_last_activity(&mut threads);

        tracing::debug!(
            viewer = identity,
            threads = threads.len(),
            skipped = dataset.conversations.len() - threads.len(),
            "conversation store loaded"
        );

        Self {
            viewer: Some(identity.to_string()),
            threads,
        }
    }

    // ===== Getters =====

    pub fn viewer(&self) -> Option<&str> {
        self.viewer.as_deref()
    }

    pub fn threads(&self) -> &[Conversation] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn get(&self, thread_id: &str) -> Option<&Conversation> {
        self.threads.iter().find(|t| t.thread_id == thread_id)
    }

    pub fn contains(&self, thread_id: &str) -> bool {
        self.get(thread_id).is_some()
    }

    /// Filtered threads, most recent activity first.
    pub fn view(&self, filter: &ConversationFilter) -> Vec<&Conversation> {
        let Some(viewer) = self.viewer() else {
            return Vec::new();
        };
        let mut threads: Vec<&Conversation> = self
            .threads
            .iter()
            .filter(|t| filter.matches(t, viewer))
            .collect();
        threads.sort_by_key(|t| std::cmp::Reverse(t.last_activity_key()));
        threads
    }

    pub fn total_unread(&self) -> usize {
        match self.viewer() {
            Some(viewer) => unread::total_unread(&self.threads, viewer),
            None => 0,
        }
    }

    // ===== Mutations =====

    fn position(&self, thread_id: &str) -> Result<usize, StoreError> {
        self.threads
            .iter()
            .position(|t| t.thread_id == thread_id)
            .ok_or_else(|| StoreError::ThreadNotFound(thread_id.to_string()))
    }

    /// Append a message to the end of a thread.
    pub fn append(&mut self, thread_id: &str, message: Message) -> Result<&Conversation, StoreError> {
        let idx = match self.position(thread_id) {
            Ok(idx) => idx,
            Err(e) => {
                tracing::warn!(thread_id, "append to unknown thread");
                return Err(e);
            }
        };
        let thread = &mut self.threads[idx];
        thread.messages.push(message);
        tracing::debug!(thread_id, messages = thread.messages.len(), "message appended");
        Ok(&self.threads[idx])
    }

    /// Replace the stored thread that has the same id.
    pub fn commit(&mut self, thread: Conversation) -> Result<&Conversation, StoreError> {
        let idx = self.position(&thread.thread_id)?;
        self.threads[idx] = thread;
        Ok(&self.threads[idx])
    }

    /// Existing thread with `counterpart` about the same listing, or a new
    /// empty one placed first in the list. `created_at` keeps a new thread
    /// ahead of older activity in `view` until its first message.
    pub fn start_thread(
        &mut self,
        counterpart: &str,
        listing: ListingContext,
        created_at: Timestamp,
    ) -> Result<&Conversation, StoreError> {
        let viewer = self.viewer.clone().ok_or(StoreError::NoViewer)?;
        let counterpart = counterpart.trim();
        if counterpart.is_empty() {
            return Err(StoreError::InvalidCounterpart);
        }
        if counterpart == viewer {
            return Err(StoreError::SelfConversation);
        }

        let existing = self.threads.iter().position(|t| {
            t.involves(counterpart)
                && match (&listing.listing_id, &t.listing_id) {
                    (Some(wanted), Some(have)) => wanted == have,
                    _ => t.listing_title == listing.title,
                }
        });
        if let Some(idx) = existing {
            return Ok(&self.threads[idx]);
        }

        let mut thread = Conversation::new(
            format!("thread-{}", Uuid::new_v4()),
            [viewer, counterpart.to_string()],
            listing.title,
        );
        thread.listing_id = listing.listing_id;
        thread.listing_price = listing.price;
        thread.created_at = Some(created_at);
        tracing::info!(thread_id = %thread.thread_id, "started conversation");

        self.threads.insert(0, thread);
        Ok(&self.threads[0])
    }
}
