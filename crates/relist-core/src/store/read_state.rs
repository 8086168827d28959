use crate::models::Conversation;

/// Read-state after the viewer opens `thread`.
///
/// Counterpart messages that are unread and not pending approval become
/// read; everything else is left as is. The caller commits the result back
/// into the store.
pub fn mark_read(thread: &Conversation, viewer: &str) -> Conversation {
    let mut updated = thread.clone();
    for message in updated.messages.iter_mut() {
        if message.is_unread_for(viewer) {
            message.read = true;
        }
    }
    updated
}

/// Number of messages `mark_read` would flip.
pub fn pending_reads(thread: &Conversation, viewer: &str) -> usize {
    thread.unread_count(viewer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, MessageStatus, Timestamp};

    const ADA: &str = "ada@example.com";
    const BOB: &str = "bob@example.com";

    fn msg(sender: &str, read: bool, status: MessageStatus, at: &str) -> Message {
        Message {
            sender: sender.to_string(),
            content: format!("from {sender}"),
            timestamp: Timestamp::new(at),
            read,
            status,
        }
    }

    fn thread() -> Conversation {
        let mut thread = Conversation::new(
            "t1".to_string(),
            [ADA.to_string(), BOB.to_string()],
            "Oak bookshelf".to_string(),
        );
        thread.messages = vec![
            msg(BOB, false, MessageStatus::Sent, "2024-03-01T10:00:00Z"),
            msg(ADA, false, MessageStatus::Sent, "2024-03-01T10:01:00Z"),
            msg(BOB, false, MessageStatus::PendingApproval, "2024-03-01T10:02:00Z"),
            msg(ADA, true, MessageStatus::PendingApproval, "2024-03-01T10:03:00Z"),
            msg(BOB, false, MessageStatus::Approved, "2024-03-01T10:04:00Z"),
        ];
        thread
    }

    #[test]
    fn test_marks_counterpart_messages_only() {
        let before = thread();
        let after = mark_read(&before, ADA);

        assert!(after.messages[0].read);
        assert!(!after.messages[1].read, "viewer's own message is untouched");
        assert!(!after.messages[2].read, "pending approval stays unread");
        assert!(after.messages[3].read);
        assert!(after.messages[4].read);
        assert_eq!(after.unread_count(ADA), 0);
    }

    #[test]
    fn test_does_not_reorder_or_drop() {
        let before = thread();
        let after = mark_read(&before, ADA);
        assert_eq!(after.messages.len(), before.messages.len());
        for (a, b) in after.messages.iter().zip(before.messages.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.content, b.content);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_is_idempotent() {
        let once = mark_read(&thread(), ADA);
        let twice = mark_read(&once, ADA);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let before = thread();
        let _ = mark_read(&before, ADA);
        assert_eq!(pending_reads(&before, ADA), 2);
    }

    #[test]
    fn test_viewer_perspective_matters() {
        let after = mark_read(&thread(), BOB);
        assert!(!after.messages[0].read, "bob's own message stays unread");
        assert!(after.messages[1].read);
    }

    mod proptest_read_state {
        use super::*;
        use crate::proptest_generators::{arb_conversation, arb_identity, proptest_config};
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(proptest_config())]

            /// After marking read, nothing in the thread counts as unread for the viewer.
            #[test]
            fn prop_mark_read_clears_unread(thread in arb_conversation(), viewer in arb_identity()) {
                let after = mark_read(&thread, &viewer);
                prop_assert_eq!(after.unread_count(&viewer), 0);
            }

            /// Only counterpart, non-pending messages change, and only from unread to read.
            #[test]
            fn prop_mark_read_touches_only_eligible(thread in arb_conversation(), viewer in arb_identity()) {
                let after = mark_read(&thread, &viewer);
                prop_assert_eq!(after.messages.len(), thread.messages.len());
                prop_assert_eq!(&after.thread_id, &thread.thread_id);
                for (before, after) in thread.messages.iter().zip(after.messages.iter()) {
                    prop_assert_eq!(&before.sender, &after.sender);
                    prop_assert_eq!(&before.content, &after.content);
                    prop_assert_eq!(&before.timestamp, &after.timestamp);
                    prop_assert_eq!(before.status, after.status);
                    if before.is_from(&viewer) || before.status.is_pending() {
                        prop_assert_eq!(before.read, after.read);
                    } else {
                        prop_assert!(after.read);
                    }
                }
            }

            #[test]
            fn prop_mark_read_is_idempotent(thread in arb_conversation(), viewer in arb_identity()) {
                let once = mark_read(&thread, &viewer);
                prop_assert_eq!(mark_read(&once, &viewer), once);
            }

            #[test]
            fn prop_pending_reads_matches_flips(thread in arb_conversation(), viewer in arb_identity()) {
                let after = mark_read(&thread, &viewer);
                let flipped = thread
                    .messages
                    .iter()
                    .zip(after.messages.iter())
                    .filter(|(b, a)| b.read != a.read)
                    .count();
                prop_assert_eq!(pending_reads(&thread, &viewer), flipped);
            }
        }
    }
}
