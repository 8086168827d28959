pub mod composer;
pub mod conversation_store;
pub mod fixtures;
pub mod read_state;
pub mod session;
pub mod unread;

pub use composer::compose;
pub use conversation_store::{ConversationFilter, ConversationStore, ListingContext, StoreError};
pub use fixtures::{Dataset, FixtureError};
pub use read_state::mark_read;
pub use session::{
    Clock, MessagingSession, QuickReplyOutcome, SendOutcome, SkipReason, SystemClock,
    TypingIndicator,
};
pub use unread::total_unread;
