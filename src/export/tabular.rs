//! Tabular (CSV) export
//!
//! Flattens the envelope into `(category, field, value, timestamp)` rows:
//! one row per leaf field. Record arrays are flattened element by element
//! with `index.key` field names; values nested below a record's top level are
//! kept as compact JSON text. Empty and scalar records get a single `index` row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::ExportEnvelope;
use crate::error::{ReportError, ReportResult};
use crate::models::RecordKind;

/// One flattened leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    pub category: String,
    pub field: String,
    pub value: String,
    pub timestamp: String,
}

/// Category -> field -> value
pub type Regrouped = BTreeMap<String, BTreeMap<String, String>>;

/// Flatten the envelope into rows
pub fn flatten(envelope: &ExportEnvelope) -> ReportResult<Vec<TabularRow>> {
    let timestamp = envelope.export_info.generated_at.to_rfc3339();
    let mut rows = Vec::new();

    let export_info = serde_json::to_value(&envelope.export_info)?;
    push_object(&mut rows, "exportInfo", export_info, &timestamp);
    let account = serde_json::to_value(&envelope.account)?;
    push_object(&mut rows, "account", account, &timestamp);
    push_object(&mut rows, "userSettings", envelope.user_settings.clone(), &timestamp);

    for (kind, records) in envelope.financial_data.iter() {
        for (index, record) in records.iter().enumerate() {
            for (field, leaf) in record_leaves(index, record) {
                rows.push(row(kind.key(), field, leaf, &timestamp));
            }
        }
    }

    let metrics = serde_json::to_value(&envelope.summary.metrics)?;
    push_object(&mut rows, "metrics", metrics, &timestamp);
    let counts = serde_json::to_value(&envelope.summary.dataset_counts)?;
    push_object(&mut rows, "datasetCounts", counts, &timestamp);

    Ok(rows)
}

fn push_object(rows: &mut Vec<TabularRow>, category: &str, value: Value, timestamp: &str) {
    if let Value::Object(map) = value {
        for (key, leaf) in map {
            rows.push(row(category, key, &leaf, timestamp));
        }
    }
}

/// Field names and leaves of one record
///
/// Objects yield one `index.key` leaf per key. Empty objects and non-object
/// records yield a single leaf named by the index, so every record keeps a row.
fn record_leaves(index: usize, record: &Value) -> Vec<(String, &Value)> {
    match record {
        Value::Object(map) if !map.is_empty() => map
            .iter()
            .map(|(key, leaf)| (format!("{}.{}", index, key), leaf))
            .collect(),
        other => vec![(index.to_string(), other)],
    }
}

fn row(category: &str, field: impl Into<String>, leaf: &Value, timestamp: &str) -> TabularRow {
    TabularRow {
        category: category.to_string(),
        field: field.into(),
        value: leaf_text(leaf),
        timestamp: timestamp.to_string(),
    }
}

/// Text form of a leaf: strings raw, null empty, anything else as JSON
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Serialize the envelope to CSV
pub fn export_tabular(envelope: &ExportEnvelope) -> ReportResult<String> {
    let rows = flatten(envelope)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Export(e.to_string()))
}

/// Parse CSV produced by `export_tabular`
pub fn parse_tabular(csv_str: &str) -> ReportResult<Vec<TabularRow>> {
    let mut reader = csv::Reader::from_reader(csv_str.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Group rows back into category -> field -> value maps
pub fn regroup(rows: &[TabularRow]) -> Regrouped {
    let mut grouped = Regrouped::new();
    for row in rows {
        grouped
            .entry(row.category.clone())
            .or_default()
            .insert(row.field.clone(), row.value.clone());
    }
    grouped
}

/// Leaf values of the envelope in regrouped form, read directly from the
/// snapshot structure
pub fn snapshot_leaves(envelope: &ExportEnvelope) -> ReportResult<Regrouped> {
    let snapshot = serde_json::to_value(envelope)?;
    let mut grouped = Regrouped::new();

    let mut insert_object = |category: &str, value: Option<&Value>| {
        if let Some(Value::Object(map)) = value {
            let entry = grouped.entry(category.to_string()).or_default();
            for (key, leaf) in map {
                entry.insert(key.clone(), leaf_text(leaf));
            }
        }
    };
    insert_object("exportInfo", snapshot.get("exportInfo"));
    insert_object("account", snapshot.get("account"));
    insert_object("userSettings", snapshot.get("userSettings"));
    insert_object("metrics", snapshot.pointer("/summary/metrics"));
    insert_object("datasetCounts", snapshot.pointer("/summary/datasetCounts"));

    for kind in RecordKind::ALL {
        let pointer = format!("/financialData/{}", kind.key());
        let Some(Value::Array(records)) = snapshot.pointer(&pointer) else {
            continue;
        };
        for (index, record) in records.iter().enumerate() {
            let entry = grouped.entry(kind.key().to_string()).or_default();
            for (field, leaf) in record_leaves(index, record) {
                entry.insert(field, leaf_text(leaf));
            }
        }
    }

    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{AccountProfile, RawRecordSet};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> ExportEnvelope {
        let records = RawRecordSet::new()
            .with(
                RecordKind::Debts,
                vec![
                    json!({"name": "Visa, Gold", "balance": 500, "creditLimit": 2000}),
                    json!({"name": "Loan \"A\"", "balance": 100, "terms": {"months": 12}}),
                ],
            )
            .with(RecordKind::TaxScenarios, vec![json!("flat"), json!(null)]);
        let at = Utc.with_ymd_and_hms(2024, 6, 30, 18, 45, 0).unwrap();
        ExportEnvelope::build(records, &AccountProfile::anonymous(), &Settings::default(), at)
            .unwrap()
    }

    #[test]
    fn test_rows_have_header_and_timestamp() {
        let csv = export_tabular(&sample()).unwrap();
        assert!(csv.starts_with("category,field,value,timestamp\n"));
        assert!(csv.contains("2024-06-30T18:45:00+00:00"));
    }

    #[test]
    fn test_array_elements_are_indexed() {
        let rows = flatten(&sample()).unwrap();
        let grouped = regroup(&rows);
        assert_eq!(grouped["debts"]["0.name"], "Visa, Gold");
        assert_eq!(grouped["debts"]["1.balance"], "100");
        assert_eq!(grouped["debts"]["1.terms"], r#"{"months":12}"#);
        assert_eq!(grouped["taxScenarios"]["0"], "flat");
        assert_eq!(grouped["taxScenarios"]["1"], "");
        assert_eq!(grouped["metrics"]["totalDebt"], "600.0");
        assert_eq!(grouped["metrics"]["savingsProgress"], "");
        assert_eq!(grouped["datasetCounts"]["totalDatasets"], "4");
    }

    #[test]
    fn test_csv_rows_cover_every_record() {
        let records = RawRecordSet::new()
            .with(
                RecordKind::Debts,
                vec![json!({}), json!({"balance": "500"}), json!({"balance": 500})],
            )
            .with(RecordKind::Budgets, vec![json!({"category": "Rent", "amount": 1200.5})]);
        let at = Utc.with_ymd_and_hms(2024, 6, 30, 18, 45, 0).unwrap();
        let envelope =
            ExportEnvelope::build(records, &AccountProfile::anonymous(), &Settings::default(), at)
                .unwrap();

        let csv = export_tabular(&envelope).unwrap();
        let grouped = regroup(&parse_tabular(&csv).unwrap());

        assert_eq!(grouped["datasetCounts"]["debts"], "3");
        assert_eq!(grouped["debts"]["0"], "{}");
        assert_eq!(grouped["debts"]["1.balance"], "500");
        assert_eq!(grouped["debts"]["2.balance"], "500");
        assert_eq!(grouped["budgets"]["0.amount"], "1200.5");

        let data = serde_json::to_value(&envelope.financial_data).unwrap();
        for (category, records) in data.as_object().unwrap() {
            let records = records.as_array().unwrap();
            if records.is_empty() {
                assert!(!grouped.contains_key(category));
                continue;
            }
            let fields = &grouped[category];
            for (index, record) in records.iter().enumerate() {
                let prefix = format!("{}.", index);
                let covered = fields
                    .keys()
                    .any(|field| *field == index.to_string() || field.starts_with(&prefix));
                assert!(covered, "{} record {} has no row", category, index);

                for (key, leaf) in record.as_object().unwrap() {
                    let expected = match leaf {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    assert_eq!(fields[&format!("{}.{}", index, key)], expected);
                }
            }
            assert_eq!(
                grouped["datasetCounts"][category],
                records.len().to_string()
            );
        }
    }

    #[test]
    fn test_empty_kinds_produce_no_rows() {
        let rows = flatten(&sample()).unwrap();
        assert!(!rows.iter().any(|r| r.category == "budgets"));
    }
}
