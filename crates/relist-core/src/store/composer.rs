use crate::models::{ComposeMode, Message, Timestamp};

/// Build an outgoing message for `viewer`.
///
/// Returns `None` when the text is empty after trimming; nothing should be
/// appended in that case. The sender's own message is always marked read.
pub fn compose(viewer: &str, text: &str, mode: ComposeMode, timestamp: Timestamp) -> Option<Message> {
    let content = text.trim();
    if content.is_empty() {
        return None;
    }

    Some(Message {
        sender: viewer.to_string(),
        content: content.to_string(),
        timestamp,
        read: true,
        status: mode.initial_status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageStatus;

    fn at() -> Timestamp {
        Timestamp::new("2024-03-14T10:00:00Z")
    }

    #[test]
    fn test_direct_message_is_sent_and_read() {
        let msg = compose("ada@example.com", "  Still available? ", ComposeMode::Direct, at())
            .unwrap();
        assert_eq!(msg.content, "Still available?");
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(msg.read);
        assert_eq!(msg.sender, "ada@example.com");
    }

    #[test]
    fn test_for_approval_is_pending_and_read() {
        let msg = compose(
            "ada@example.com",
            "I'd like to offer ₹95,000.",
            ComposeMode::ForApproval,
            at(),
        )
        .unwrap();
        assert_eq!(msg.status, MessageStatus::PendingApproval);
        assert!(msg.read);
    }

    #[test]
    fn test_blank_text_composes_nothing() {
        for text in ["", "   ", "\n\t "] {
            assert_eq!(compose("ada@example.com", text, ComposeMode::Direct, at()), None);
            assert_eq!(
                compose("ada@example.com", text, ComposeMode::ForApproval, at()),
                None
            );
        }
    }

    mod proptest_composer {
        use super::*;
        use crate::proptest_generators::{
            arb_blank_text, arb_conversation, arb_identity, proptest_config,
        };
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(proptest_config())]

            /// Blank text never produces a message, so the thread cannot grow.
            #[test]
            fn prop_blank_compose_leaves_thread_length(
                thread in arb_conversation(),
                viewer in arb_identity(),
                text in arb_blank_text(),
                for_approval in any::<bool>(),
            ) {
                let mode = if for_approval { ComposeMode::ForApproval } else { ComposeMode::Direct };
                let mut thread = thread;
                let before = thread.messages.len();
                if let Some(message) = compose(&viewer, &text, mode, at()) {
                    thread.messages.push(message);
                }
                prop_assert_eq!(thread.messages.len(), before);
            }

            /// A composed message belongs to the viewer and never counts toward their unread total.
            #[test]
            fn prop_composed_message_is_own_and_read(
                viewer in arb_identity(),
                text in "[ ]{0,3}[a-zA-Z0-9?!]{1,40}[ ]{0,3}",
                for_approval in any::<bool>(),
            ) {
                let mode = if for_approval { ComposeMode::ForApproval } else { ComposeMode::Direct };
                let message = compose(&viewer, &text, mode, at()).expect("non-blank text composes");
                prop_assert_eq!(&message.sender, &viewer);
                prop_assert!(message.read);
                prop_assert_eq!(message.content.as_str(), text.trim());
                prop_assert_eq!(message.status, mode.initial_status());
                prop_assert!(!message.is_unread_for(&viewer));
            }
        }
    }
}
