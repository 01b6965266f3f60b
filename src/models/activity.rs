//! Activity event model

use chrono::NaiveDateTime;
use serde_json::Value;

use super::coerce;

/// One activity log event read leniently from a raw record
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub occurred_at: Option<NaiveDateTime>,
    pub event_type: String,
    pub text: String,
}

impl ActivityEvent {
    /// Read an event from a raw record
    pub fn from_value(record: &Value) -> Self {
        let event_type = coerce::text(coerce::first_field(record, &["type", "kind"]))
            .unwrap_or_else(|| "event".to_string());
        let text = coerce::text(coerce::first_field(
            record,
            &["text", "description", "message"],
        ))
        .unwrap_or_else(|| event_type.replace('_', " "));

        Self {
            occurred_at: coerce::datetime(coerce::first_field(
                record,
                &["timestamp", "date", "createdAt"],
            )),
            event_type,
            text,
        }
    }

    /// Date label for display
    pub fn date_label(&self) -> String {
        self.occurred_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Undated".to_string())
    }
}

/// The `limit` most recent events, newest first
///
/// Ties (and undated events) keep their original record order.
pub fn most_recent(records: &[Value], limit: usize) -> Vec<ActivityEvent> {
    let mut events: Vec<ActivityEvent> = records.iter().map(ActivityEvent::from_value).collect();
    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    events.truncate(limit);
    events
}
