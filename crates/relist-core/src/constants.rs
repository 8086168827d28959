//! Application-wide constants
//!
//! Canned strings and tuning values shared by the messaging and listing
//! modules.

/// Rendered in place of a timestamp that does not parse
pub const INVALID_DATE: &str = "Invalid Date";

// Thread defaults
pub const DEFAULT_LISTING_TITLE: &str = "Untitled listing";

/// Characters of the last message shown in a conversation list row
pub const PREVIEW_CHARS: usize = 60;

// Quick replies
pub const NEGOTIABLE_QUESTION: &str = "Is the price negotiable?";
pub const OTHER_REPLY: &str = "Other";

/// Canned quick replies in display order. `NEGOTIABLE_QUESTION` is replaced
/// by generated offers when the listing has a price.
pub const QUICK_REPLY_CATALOG: &[&str] = &[
    "Is this still available?",
    NEGOTIABLE_QUESTION,
    "Can you share more photos?",
    "What is the condition of the item?",
    "Is delivery available?",
    OTHER_REPLY,
];

/// Fractions of the listing price offered by the negotiation replies
pub const OFFER_RATIOS: [f64; 3] = [0.98, 0.965, 0.95];

/// How long the counterpart "typing" indicator stays up after a send
pub const DEFAULT_TYPING_INDICATOR_MS: u64 = 1500;

// Listing wizard limits
pub const MAX_TITLE_CHARS: usize = 80;
pub const MIN_DESCRIPTION_CHARS: usize = 20;
pub const POSTAL_CODE_DIGITS: usize = 6;
pub const PHONE_DIGITS: usize = 10;
