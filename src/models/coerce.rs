//! Lenient readers for loosely-typed records
//!
//! Records arrive as arbitrary JSON. These helpers pull numbers, text and
//! dates out of them without ever failing: a malformed number reads as zero,
//! and nothing here can yield NaN or infinity.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Look up a field on an object record (None for non-objects)
pub fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.as_object().and_then(|obj| obj.get(key))
}

/// Look up the first present (non-null) field among several aliases
pub fn first_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| field(record, key))
        .find(|v| !v.is_null())
}

/// True when the value exists and is not null
pub fn is_present(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Parse a finite number from a JSON number or a numeric string
///
/// Strings may carry a leading currency symbol, thousands separators and
/// surrounding whitespace.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Read a number, treating missing or malformed values as zero
pub fn number(value: Option<&Value>) -> f64 {
    value.and_then(parse_number).unwrap_or(0.0)
}

/// Read an optional number
///
/// Absent or null reads as `None`; present-but-malformed reads as `Some(0.0)`
/// so that a garbled field never silently falls through to a fallback.
pub fn optional_number(value: Option<&Value>) -> Option<f64> {
    if is_present(value) {
        Some(number(value))
    } else {
        None
    }
}

/// Read text from a string, number or bool value
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a point in time
///
/// Accepts RFC 3339 strings, `YYYY-MM-DD[THH:MM:SS]` strings, epoch numbers
/// (milliseconds when large enough, seconds otherwise) and document-store
/// timestamp objects of the form `{seconds, nanoseconds}`.
pub fn datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value? {
        Value::String(s) => parse_datetime_str(s.trim()),
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(parse_number)?;
            DateTime::from_timestamp(seconds as i64, 0).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn from_epoch(n: f64) -> Option<NaiveDateTime> {
    if !n.is_finite() {
        return None;
    }
    // Anything past 1e11 cannot be seconds for a plausible date
    let dt = if n.abs() >= 1e11 {
        DateTime::from_timestamp_millis(n as i64)
    } else {
        DateTime::from_timestamp(n as i64, 0)
    };
    dt.map(|dt| dt.naive_utc())
}

/// Return the value if finite, otherwise zero
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Return `Some(n)` only when finite
pub fn finite(n: f64) -> Option<f64> {
    if n.is_finite() {
        Some(n)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number(&json!(12.5)), Some(12.5));
        assert_eq!(parse_number(&json!("1,200.50")), Some(1200.5));
        assert_eq!(parse_number(&json!(" $40 ")), Some(40.0));
        assert_eq!(parse_number(&json!("abc")), None);
        assert_eq!(parse_number(&json!(true)), None);
        assert_eq!(parse_number(&json!("NaN")), None);
        assert_eq!(parse_number(&json!("inf")), None);
    }

    #[test]
    fn test_optional_number_distinguishes_absent_from_malformed() {
        let record = json!({"spent": "oops", "amount": null});
        assert_eq!(optional_number(field(&record, "spent")), Some(0.0));
        assert_eq!(optional_number(field(&record, "amount")), None);
        assert_eq!(optional_number(field(&record, "budgeted")), None);
    }

    #[test]
    fn test_first_field_skips_nulls() {
        let record = json!({"text": null, "description": "Paid rent"});
        assert_eq!(
            text(first_field(&record, &["text", "description"])),
            Some("Paid rent".to_string())
        );
    }

    #[test]
    fn test_datetime_formats() {
        let date = datetime(Some(&json!("2024-02-01"))).unwrap();
        assert_eq!(date.to_string(), "2024-02-01 00:00:00");

        let rfc = datetime(Some(&json!("2024-02-01T10:30:00Z"))).unwrap();
        assert_eq!(rfc.to_string(), "2024-02-01 10:30:00");

        let millis = datetime(Some(&json!(1_706_745_600_000_i64))).unwrap();
        assert_eq!(millis.date().to_string(), "2024-02-01");

        let secs = datetime(Some(&json!(1_706_745_600))).unwrap();
        assert_eq!(secs.date().to_string(), "2024-02-01");

        let stamp = datetime(Some(&json!({"seconds": 1_706_745_600, "nanoseconds": 0}))).unwrap();
        assert_eq!(stamp.date().to_string(), "2024-02-01");

        assert!(datetime(Some(&json!("last tuesday"))).is_none());
        assert!(datetime(None).is_none());
    }

    #[test]
    fn test_finite_guards() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite(f64::NEG_INFINITY), None);
        assert_eq!(finite(2.5), Some(2.5));
    }
}
