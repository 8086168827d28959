//! Property-based test generators for conversations.
//!
//! Threads always have two distinct participants drawn from a small pool so
//! generated viewers are frequently, but not always, part of the thread.

use proptest::prelude::*;

use crate::models::{Conversation, Message, MessageStatus, Timestamp};

/// Identities used for participants, senders and viewers.
pub const IDENTITIES: [&str; 4] = [
    "ada@example.com",
    "bob@example.com",
    "chitra@example.com",
    "dev@example.com",
];

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

pub fn arb_identity() -> impl Strategy<Value = String> {
    (0..IDENTITIES.len()).prop_map(|i| IDENTITIES[i].to_string())
}

pub fn arb_status() -> impl Strategy<Value = MessageStatus> {
    prop_oneof![
        Just(MessageStatus::Sent),
        Just(MessageStatus::PendingApproval),
        Just(MessageStatus::Approved),
        Just(MessageStatus::Rejected),
    ]
}

/// Text that trims to nothing.
pub fn arb_blank_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t\r\n]{0,12}").expect("valid regex")
}

fn arb_message(participants: [String; 2]) -> impl Strategy<Value = Message> {
    (any::<bool>(), any::<bool>(), arb_status(), 0u32..86_400).prop_map(
        move |(from_first, read, status, seconds)| {
            let sender = if from_first {
                participants[0].clone()
            } else {
                participants[1].clone()
            };
            Message {
                content: format!("message from {sender}"),
                sender,
                timestamp: Timestamp::new(format!(
                    "2024-03-01T{:02}:{:02}:{:02}Z",
                    seconds / 3600,
                    seconds / 60 % 60,
                    seconds % 60
                )),
                read,
                status,
            }
        },
    )
}

pub fn arb_conversation() -> impl Strategy<Value = Conversation> {
    (0..IDENTITIES.len(), 1..IDENTITIES.len(), "[a-z0-9]{1,8}")
        .prop_flat_map(|(first, offset, suffix)| {
            let participants = [
                IDENTITIES[first].to_string(),
                IDENTITIES[(first + offset) % IDENTITIES.len()].to_string(),
            ];
            let messages = proptest::collection::vec(arb_message(participants.clone()), 0..12);
            (Just(participants), Just(suffix), messages)
        })
        .prop_map(|(participants, suffix, messages)| {
            let mut thread = Conversation::new(
                format!("thread-{suffix}"),
                participants,
                "Generated listing".to_string(),
            );
            thread.messages = messages;
            thread
        })
}
