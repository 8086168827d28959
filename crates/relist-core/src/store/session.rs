use chrono::{DateTime, Utc};

use super::composer::compose;
use super::conversation_store::{ConversationFilter, ConversationStore, ListingContext, StoreError};
use super::fixtures::Dataset;
use super::read_state::{mark_read, pending_reads};
use crate::config::CoreConfig;
use crate::identity::{IdentityProvider, UserInfo};
use crate::models::{quick_replies, ComposeMode, Conversation, Message, QuickReply, Timestamp};

// =============================================================================
// Clock
// =============================================================================

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// Typing indicator
// =============================================================================

/// Cosmetic "counterpart is typing" flag that expires after a fixed time.
#[derive(Debug, Clone)]
pub struct TypingIndicator {
    duration: chrono::Duration,
    until: Option<DateTime<Utc>>,
}

impl TypingIndicator {
    pub fn new(duration: std::time::Duration) -> Self {
        Self {
            duration: chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero()),
            until: None,
        }
    }

    /// Deadlines past chrono's range saturate at the maximum instant.
    pub fn start(&mut self, now: DateTime<Utc>) {
        let until = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.until = Some(until);
    }

    pub fn clear(&mut self) {
        self.until = None;
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Why a send was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoViewer,
    NoActiveThread,
    EmptyText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(Message),
    Skipped(SkipReason),
}

impl SendOutcome {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Sent(message) => Some(message),
            Self::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickReplyOutcome {
    Sent(Message),
    /// "Other" was picked; the composer is now in free-text mode
    FreeText,
    Skipped(SkipReason),
}

// =============================================================================
// MessagingSession
// =============================================================================

/// Messaging state for one signed-in viewer during one page session.
///
/// Owns its conversation store exclusively; dropping the session discards
/// every change.
pub struct MessagingSession<C: Clock = SystemClock> {
    user: Option<UserInfo>,
    store: ConversationStore,
    config: CoreConfig,
    clock: C,
    active_thread: Option<String>,
    show_quick_replies: bool,
    free_text: bool,
    draft: String,
    /// Cursor position in the draft, in chars
    cursor: usize,
    typing: TypingIndicator,
}

impl MessagingSession<SystemClock> {
    pub fn start(provider: &dyn IdentityProvider, dataset: &Dataset, config: CoreConfig) -> Self {
        Self::with_clock(provider, dataset, config, SystemClock)
    }
}

impl<C: Clock> MessagingSession<C> {
    pub fn with_clock(
        provider: &dyn IdentityProvider,
        dataset: &Dataset,
        config: CoreConfig,
        clock: C,
    ) -> Self {
        let user = provider.current_user();
        let store = match user.as_ref().and_then(UserInfo::viewer_identity) {
            Some(viewer) => ConversationStore::load(dataset, viewer),
            None => ConversationStore::empty(),
        };

        tracing::info!(
            viewer = store.viewer().unwrap_or("<none>"),
            threads = store.len(),
            unread = store.total_unread(),
            "messaging session started"
        );

        let typing = TypingIndicator::new(config.typing_indicator());
        Self {
            user,
            store,
            config,
            clock,
            active_thread: None,
            show_quick_replies: true,
            free_text: false,
            draft: String::new(),
            cursor: 0,
            typing,
        }
    }

    // ===== Getters =====

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn viewer(&self) -> Option<&str> {
        self.store.viewer()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn conversations(&self, filter: &ConversationFilter) -> Vec<&Conversation> {
        self.store.view(filter)
    }

    pub fn active_thread(&self) -> Option<&Conversation> {
        self.active_thread
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    pub fn total_unread(&self) -> usize {
        self.store.total_unread()
    }

    pub fn quick_replies_visible(&self) -> bool {
        self.show_quick_replies
    }

    pub fn is_free_text(&self) -> bool {
        self.free_text
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_counterpart_typing(&self) -> bool {
        self.typing.is_active(self.clock.now())
    }

    // ===== Thread selection =====

    /// Make a thread active and mark the counterpart's messages read.
    pub fn open_thread(&mut self, thread_id: &str) -> Result<&Conversation, StoreError> {
        let viewer = self.store.viewer().ok_or(StoreError::NoViewer)?.to_string();
        let thread = self
            .store
            .get(thread_id)
            .ok_or_else(|| StoreError::ThreadNotFound(thread_id.to_string()))?;

        let flipped = pending_reads(thread, &viewer);
        let updated = mark_read(thread, &viewer);
        self.store.commit(updated)?;
        tracing::debug!(thread_id, marked_read = flipped, "thread opened");

        if self.active_thread.as_deref() != Some(thread_id) {
            self.draft.clear();
            self.cursor = 0;
            self.typing.clear();
        }
        self.active_thread = Some(thread_id.to_string());
        self.free_text = false;
        self.show_quick_replies = true;

        self.store
            .get(thread_id)
            .ok_or_else(|| StoreError::ThreadNotFound(thread_id.to_string()))
    }

    pub fn close_thread(&mut self) {
        self.active_thread = None;
        self.free_text = false;
        self.draft.clear();
        self.cursor = 0;
        self.typing.clear();
    }

    /// "Contact seller": find or create the thread, then open it.
    pub fn start_conversation(
        &mut self,
        counterpart: &str,
        listing: ListingContext,
    ) -> Result<&Conversation, StoreError> {
        let created_at = Timestamp::from(self.clock.now());
        let thread_id = self
            .store
            .start_thread(counterpart, listing, created_at)?
            .thread_id
            .clone();
        self.open_thread(&thread_id)
    }

    // ===== Sending =====

    /// Compose and append to the active thread. Missing viewer, missing
    /// active thread and blank text are no-ops.
    pub fn send(&mut self, text: &str, mode: ComposeMode) -> SendOutcome {
        let Some(viewer) = self.store.viewer().map(str::to_string) else {
            return self.skip(SkipReason::NoViewer);
        };
        let Some(thread_id) = self.active_thread.clone() else {
            return self.skip(SkipReason::NoActiveThread);
        };

        let now = self.clock.now();
        let Some(message) = compose(&viewer, text, mode, Timestamp::from(now)) else {
            return self.skip(SkipReason::EmptyText);
        };

        if self.store.append(&thread_id, message.clone()).is_err() {
            self.active_thread = None;
            return self.skip(SkipReason::NoActiveThread);
        }

        if mode == ComposeMode::Direct {
            self.typing.start(now);
        }
        tracing::debug!(thread_id = %thread_id, status = message.status.label(), "message sent");
        SendOutcome::Sent(message)
    }

    fn skip(&self, reason: SkipReason) -> SendOutcome {
        tracing::debug!(?reason, "send skipped");
        SendOutcome::Skipped(reason)
    }

    // ===== Quick replies =====

    /// Quick replies for the active thread.
    pub fn quick_replies(&self) -> Vec<QuickReply> {
        self.active_thread()
            .map(|thread| quick_replies(thread, &self.config.currency))
            .unwrap_or_default()
    }

    pub fn toggle_quick_replies(&mut self) -> bool {
        self.show_quick_replies = !self.show_quick_replies;
        self.show_quick_replies
    }

    pub fn select_quick_reply(&mut self, reply: &QuickReply) -> QuickReplyOutcome {
        match reply.message() {
            Some((text, mode)) => match self.send(&text, mode) {
                SendOutcome::Sent(message) => QuickReplyOutcome::Sent(message),
                SendOutcome::Skipped(reason) => QuickReplyOutcome::Skipped(reason),
            },
            None => {
                self.free_text = true;
                self.show_quick_replies = false;
                QuickReplyOutcome::FreeText
            }
        }
    }

    // ===== Draft editing =====

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
        self.cursor = self.draft.chars().count();
    }

    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.draft.chars().count());
    }

    /// Insert at the cursor and move the cursor past the insertion.
    pub fn insert_emoji(&mut self, emoji: &str) {
        let byte_idx = self
            .draft
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.draft.len());
        self.draft.insert_str(byte_idx, emoji);
        self.cursor += emoji.chars().count();
    }

    /// Send the draft; it is cleared only when something was sent.
    pub fn send_draft(&mut self, mode: ComposeMode) -> SendOutcome {
        let text = self.draft.clone();
        let outcome = self.send(&text, mode);
        if matches!(outcome, SendOutcome::Sent(_)) {
            self.draft.clear();
            self.cursor = 0;
            self.free_text = false;
        }
        outcome
    }
}
