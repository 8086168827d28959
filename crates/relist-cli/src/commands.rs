use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};

use relist_core::constants::PREVIEW_CHARS;
use relist_core::models::{ComposeMode, Conversation, QuickReply};
use relist_core::store::unread::unread_threads;
use relist_core::store::{ConversationFilter, Dataset, SendOutcome};
use relist_core::{CoreConfig, MessagingSession, StaticIdentity};

/// Load config (file or defaults) and apply the `--fixtures` override.
pub fn load_config(path: Option<&Path>, fixtures: Option<&Path>) -> Result<CoreConfig> {
    let mut config = match path {
        Some(path) => CoreConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CoreConfig::default(),
    };
    if let Some(fixtures) = fixtures {
        config.fixture_file = Some(fixtures.to_path_buf());
    }
    Ok(config)
}

pub fn load_dataset(config: &CoreConfig) -> Result<Dataset> {
    match config.fixture_path() {
        Some(path) => Dataset::load(&path)
            .with_context(|| format!("Failed to load fixtures: {}", path.display())),
        None => Dataset::bundled().context("Bundled fixtures are invalid"),
    }
}

pub fn start_session(config: CoreConfig, viewer: &str) -> Result<MessagingSession> {
    let dataset = load_dataset(&config)?;
    let identity = StaticIdentity::from_email(viewer);
    Ok(MessagingSession::start(&identity, &dataset, config))
}

fn thread_row(thread: &Conversation, viewer: &str) -> Value {
    let now = chrono::Utc::now();
    json!({
        "thread_id": thread.thread_id,
        "counterpart": thread.counterpart(viewer),
        "counterpart_name": thread.counterpart_name(viewer),
        "listing_title": thread.listing_title,
        "listing_price": thread.listing_price,
        "preview": thread.preview(PREVIEW_CHARS),
        "last_activity": thread.last_timestamp().map(|ts| ts.list_label(now)),
        "unread": thread.unread_count(viewer),
    })
}

fn thread_detail(thread: &Conversation, viewer: &str) -> Value {
    let messages: Vec<Value> = thread
        .messages
        .iter()
        .map(|m| {
            json!({
                "from_me": m.is_from(viewer),
                "sender": m.sender,
                "content": m.content,
                "time": m.timestamp.display(),
                "read": m.read,
                "status": m.status,
            })
        })
        .collect();

    let mut row = thread_row(thread, viewer);
    row["messages"] = Value::Array(messages);
    row
}

fn viewer_of(session: &MessagingSession) -> Result<String> {
    session
        .viewer()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("No viewer: pass a non-empty --viewer"))
}

pub fn inbox(session: &MessagingSession, query: Option<&str>, unread_only: bool) -> Result<Value> {
    let viewer = viewer_of(session)?;
    let filter = ConversationFilter {
        query: query.unwrap_or_default().to_string(),
        unread_only,
    };
    let threads: Vec<Value> = session
        .conversations(&filter)
        .into_iter()
        .map(|t| thread_row(t, &viewer))
        .collect();

    Ok(json!({
        "viewer": viewer,
        "viewer_name": session.user().map(|user| user.name.as_str()),
        "total_unread": session.total_unread(),
        "unread_threads": unread_threads(session.store().threads(), &viewer),
        "threads": threads,
    }))
}

pub fn open_thread(session: &mut MessagingSession, thread_id: &str) -> Result<Value> {
    let viewer = viewer_of(session)?;
    let unread_before = session.total_unread();
    let thread = session.open_thread(thread_id)?;
    let detail = thread_detail(thread, &viewer);

    Ok(json!({
        "thread": detail,
        "total_unread_before": unread_before,
        "total_unread_after": session.total_unread(),
    }))
}

pub fn quick_replies(session: &mut MessagingSession, thread_id: &str) -> Result<Value> {
    session.open_thread(thread_id)?;
    let replies: Vec<Value> = session
        .quick_replies()
        .iter()
        .map(|reply| {
            let kind = match reply {
                QuickReply::Question(_) => "question",
                QuickReply::Offer { .. } => "offer",
                QuickReply::Other => "other",
            };
            json!({
                "kind": kind,
                "label": reply.label(),
                "message": reply.message().map(|(text, _)| text),
            })
        })
        .collect();
    Ok(json!({ "thread_id": thread_id, "quick_replies": replies }))
}

pub fn send(
    session: &mut MessagingSession,
    thread_id: &str,
    text: &str,
    for_approval: bool,
) -> Result<Value> {
    session.open_thread(thread_id)?;
    let mode = if for_approval {
        ComposeMode::ForApproval
    } else {
        ComposeMode::Direct
    };

    match session.send(text, mode) {
        SendOutcome::Sent(message) => Ok(json!({
            "sent": true,
            "message": message,
            "thread_length": session.active_thread().map(|t| t.messages.len()),
        })),
        SendOutcome::Skipped(reason) => Ok(json!({
            "sent": false,
            "reason": format!("{reason:?}"),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ADA: &str = "ada@example.com";

    fn ada() -> MessagingSession {
        start_session(CoreConfig::default(), ADA).unwrap()
    }

    #[test]
    fn test_inbox_lists_viewer_threads() {
        let value = inbox(&ada(), None, false).unwrap();
        assert_eq!(value["total_unread"], 2);
        assert_eq!(value["unread_threads"], 2);
        let ids: Vec<&str> = value["threads"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["thread_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["thread-sofa-01", "thread-table-01", "thread-bed-01"]);
        assert_eq!(value["threads"][0]["counterpart_name"], "Bob Mehta");
        assert_eq!(value["viewer"], ADA);
        assert_eq!(value["viewer_name"], "ada");
    }

    #[test]
    fn test_inbox_without_viewer_errors() {
        let session = start_session(CoreConfig::default(), "").unwrap();
        assert!(inbox(&session, None, false).is_err());
    }

    #[test]
    fn test_open_thread_reports_unread_drop() {
        let mut session = ada();
        let value = open_thread(&mut session, "thread-sofa-01").unwrap();
        assert_eq!(value["total_unread_before"], 2);
        assert_eq!(value["total_unread_after"], 1);
        assert_eq!(value["thread"]["messages"][2]["read"], true);
    }

    #[test]
    fn test_quick_replies_include_offers() {
        let mut session = ada();
        let value = quick_replies(&mut session, "thread-sofa-01").unwrap();
        let replies = value["quick_replies"].as_array().unwrap();
        assert_eq!(replies.len(), 8);
        assert_eq!(replies[1]["kind"], "offer");
        assert_eq!(replies[1]["label"], "Offer ₹98,000");
        assert_eq!(replies[1]["message"], "I'd like to offer ₹98,000.");
        assert_eq!(replies[7]["message"], Value::Null);
    }

    #[test]
    fn test_send_reports_skip_reason() {
        let mut session = ada();
        let value = send(&mut session, "thread-bed-01", "   ", false).unwrap();
        assert_eq!(value["sent"], false);
        assert_eq!(value["reason"], "EmptyText");

        let value = send(&mut session, "thread-bed-01", "Deal!", true).unwrap();
        assert_eq!(value["sent"], true);
        assert_eq!(value["message"]["status"], "pending_approval");
        assert_eq!(value["thread_length"], 3);
    }

    #[test]
    fn test_unknown_thread_is_error() {
        let mut session = ada();
        let err = open_thread(&mut session, "thread-desk-01").unwrap_err();
        assert!(err.to_string().contains("thread-desk-01"));
    }

    #[test]
    fn test_fixtures_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("threads.json");
        std::fs::write(
            &path,
            r#"{"conversations": [{"thread_id": "only", "participants": ["ada@example.com", "x@example.com"]}]}"#,
        )
        .unwrap();

        let config = load_config(None, Some(&path)).unwrap();
        let session = start_session(config, ADA).unwrap();
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_bad_config_path_has_context() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.json")), None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load config"));
    }
}
