//! Net worth history model

use chrono::NaiveDateTime;
use serde_json::Value;

use super::coerce;

/// One net worth snapshot read leniently from a raw record
#[derive(Debug, Clone, PartialEq)]
pub struct NetWorthEntry {
    /// Parsed point in time, when the record carries a readable one
    pub recorded_at: Option<NaiveDateTime>,
    pub net_worth: f64,
    pub assets: Option<f64>,
    pub liabilities: Option<f64>,
}

impl NetWorthEntry {
    /// Read an entry from a raw record
    ///
    /// When `netWorth` is absent but both `assets` and `liabilities` are
    /// present, net worth is their difference.
    pub fn from_value(record: &Value) -> Self {
        let assets = coerce::optional_number(coerce::field(record, "assets"));
        let liabilities = coerce::optional_number(coerce::field(record, "liabilities"));
        let net_worth = match coerce::optional_number(coerce::field(record, "netWorth")) {
            Some(value) => value,
            None => match (assets, liabilities) {
                (Some(a), Some(l)) => coerce::finite_or_zero(a - l),
                _ => 0.0,
            },
        };

        Self {
            recorded_at: coerce::datetime(coerce::first_field(
                record,
                &["date", "timestamp", "createdAt"],
            )),
            net_worth,
            assets,
            liabilities,
        }
    }

    /// Date label for display
    pub fn date_label(&self) -> String {
        self.recorded_at
            .map(|dt| dt.date().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Undated".to_string())
    }
}

/// Read a history and order it ascending by date
///
/// The sort is stable; undated entries sort before dated ones so they can
/// never be taken as the latest snapshot.
pub fn sorted_history(records: &[Value]) -> Vec<NetWorthEntry> {
    let mut entries: Vec<NetWorthEntry> = records.iter().map(NetWorthEntry::from_value).collect();
    entries.sort_by_key(|e| e.recorded_at);
    entries
}
