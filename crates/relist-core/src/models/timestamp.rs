use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::INVALID_DATE;

/// ISO-8601 instant as it appeared in the dataset.
///
/// The raw text is kept so a malformed value can still be carried around
/// and rendered; parsing happens on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts RFC 3339 and zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC).
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Milliseconds since the epoch, with unparseable values pinned to 0.
    pub fn sort_key(&self) -> i64 {
        self.parse().map(|at| at.timestamp_millis()).unwrap_or(0)
    }

    /// Full form used in the thread view, e.g. `Mar 4, 2024, 3:07 PM`.
    pub fn display(&self) -> String {
        match self.parse() {
            Some(at) => at.format("%b %-d, %Y, %-I:%M %p").to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Compact form used in the conversation list.
    pub fn list_label(&self, now: DateTime<Utc>) -> String {
        let Some(at) = self.parse() else {
            return INVALID_DATE.to_string();
        };

        let today = now.date_naive();
        let day = at.date_naive();
        if day == today {
            at.format("%-I:%M %p").to_string()
        } else if Some(day) == today.pred_opt() {
            "Yesterday".to_string()
        } else if day < today && now - at < Duration::days(7) {
            at.weekday().to_string()
        } else {
            at.format("%b %-d").to_string()
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_datetime(at)
    }
}
