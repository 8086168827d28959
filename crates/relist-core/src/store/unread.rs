use crate::models::Conversation;

/// Total unread messages for `viewer` across `threads`.
///
/// Recomputed from scratch on every call.
pub fn total_unread<'a>(threads: impl IntoIterator<Item = &'a Conversation>, viewer: &str) -> usize {
    threads
        .into_iter()
        .map(|thread| thread.unread_count(viewer))
        .sum()
}

/// Threads with at least one unread message.
pub fn unread_threads<'a>(
    threads: impl IntoIterator<Item = &'a Conversation>,
    viewer: &str,
) -> usize {
    threads
        .into_iter()
        .filter(|thread| thread.unread_count(viewer) > 0)
        .count()
}
