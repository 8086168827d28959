use super::{ComposeMode, Conversation, CurrencyFormat};
use crate::constants::{NEGOTIABLE_QUESTION, OFFER_RATIOS, OTHER_REPLY, QUICK_REPLY_CATALOG};

/// A one-tap reply option shown under the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickReply {
    /// Canned question sent verbatim
    Question(String),
    /// Price offer derived from the listing price
    Offer { amount: u64, formatted: String },
    /// Switches the composer to free-text entry
    Other,
}

impl QuickReply {
    /// Text shown on the chip.
    pub fn label(&self) -> String {
        match self {
            Self::Question(text) => text.clone(),
            Self::Offer { formatted, .. } => format!("Offer {formatted}"),
            Self::Other => OTHER_REPLY.to_string(),
        }
    }

    /// Message text and mode this reply composes, or `None` for `Other`.
    pub fn message(&self) -> Option<(String, ComposeMode)> {
        match self {
            Self::Question(text) => Some((text.clone(), ComposeMode::Direct)),
            Self::Offer { formatted, .. } => {
                Some((format!("I'd like to offer {formatted}."), ComposeMode::ForApproval))
            }
            Self::Other => None,
        }
    }
}

/// Offer amounts for a listing price, highest first.
pub fn offer_amounts(price: f64) -> Vec<u64> {
    OFFER_RATIOS
        .iter()
        .map(|ratio| (price * ratio).round().max(0.0) as u64)
        .collect()
}

/// Quick replies for a thread, in display order.
///
/// With a listing price the negotiation question is swapped, in place, for
/// one offer per ratio.
pub fn quick_replies(thread: &Conversation, currency: &CurrencyFormat) -> Vec<QuickReply> {
    let price = thread
        .listing_price
        .filter(|p| p.is_finite() && *p > 0.0);

    let mut replies = Vec::with_capacity(QUICK_REPLY_CATALOG.len() + OFFER_RATIOS.len());
    for entry in QUICK_REPLY_CATALOG {
        match (*entry, price) {
            (NEGOTIABLE_QUESTION, Some(price)) => {
                replies.extend(offer_amounts(price).into_iter().map(|amount| {
                    QuickReply::Offer {
                        amount,
                        formatted: currency.format(amount),
                    }
                }));
            }
            (OTHER_REPLY, _) => replies.push(QuickReply::Other),
            (question, _) => replies.push(QuickReply::Question(question.to_string())),
        }
    }
    replies
}
