pub mod currency;
pub mod listing_draft;
pub mod message;
pub mod quick_reply;
pub mod thread;
pub mod timestamp;

pub use currency::{CurrencyFormat, Grouping};
pub use listing_draft::{
    Address, Category, Condition, ContactInfo, ContactMethod, DeliveryOptions, DimensionUnit,
    Dimensions, FieldError, Listing, ListingDetails, ListingDraft, Pricing, WizardError,
    WizardStep,
};
pub use message::{ComposeMode, Message, MessageStatus};
pub use quick_reply::{offer_amounts, quick_replies, QuickReply};
pub use thread::Conversation;
pub use timestamp::Timestamp;
