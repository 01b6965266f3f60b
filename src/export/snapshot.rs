//! JSON snapshot export
//!
//! Serializes the envelope unchanged, so a snapshot reads back into an
//! identical envelope.

use super::envelope::ExportEnvelope;
use crate::error::{ReportError, ReportResult};

/// Serialize the envelope to JSON
pub fn export_snapshot(envelope: &ExportEnvelope, pretty: bool) -> ReportResult<String> {
    if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    }
    .map_err(|e| ReportError::Export(e.to_string()))
}

/// Read a snapshot back (for verification)
pub fn import_snapshot(json_str: &str) -> ReportResult<ExportEnvelope> {
    let envelope: ExportEnvelope =
        serde_json::from_str(json_str).map_err(|e| ReportError::Export(e.to_string()))?;

    envelope.validate().map_err(ReportError::Export)?;

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{AccountProfile, RawRecordSet, RecordKind};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> ExportEnvelope {
        let records = RawRecordSet::new()
            .with(
                RecordKind::Debts,
                vec![
                    json!({"name": "Visa", "type": "credit_card", "balance": 500, "creditLimit": 2000}),
                    json!({"name": "Car", "balance": "1,250.50", "note": {"lender": "Bank"}}),
                ],
            )
            .with(
                RecordKind::NetWorthHistory,
                vec![
                    json!({"date": "2024-01-01", "netWorth": 1000}),
                    json!({"date": "2024-02-01", "netWorth": 1200}),
                ],
            );
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let profile = AccountProfile::new("Ada", "ada@example.com", "u-1");
        ExportEnvelope::build(records, &profile, &Settings::default(), at).unwrap()
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let envelope = sample();
        for pretty in [true, false] {
            let json = export_snapshot(&envelope, pretty).unwrap();
            let imported = import_snapshot(&json).unwrap();
            assert_eq!(imported, envelope);
        }
    }

    #[test]
    fn test_snapshot_roundtrip_fractional_amounts() {
        let debts = (0..40)
            .map(|i| {
                let i = i as f64;
                json!({
                    "name": format!("Card {}", i),
                    "balance": 1234.567 + i * 0.1 + 0.2,
                    "creditLimit": 3333.33 + i / 7.0,
                    "interestRate": 19.99 + i * 0.013,
                    "minimumPayment": 0.1 + 0.2 + i / 3.0,
                })
            })
            .collect();
        let records = RawRecordSet::new()
            .with(RecordKind::Debts, debts)
            .with(
                RecordKind::NetWorthHistory,
                vec![
                    json!({"date": "2024-01-01", "netWorth": 1000.1}),
                    json!({"date": "2024-02-01", "netWorth": 1200.7}),
                ],
            );
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let envelope =
            ExportEnvelope::build(records, &AccountProfile::anonymous(), &Settings::default(), at)
                .unwrap();
        assert!(envelope.summary.metrics.weighted_interest_rate.is_some());

        for pretty in [true, false] {
            let json = export_snapshot(&envelope, pretty).unwrap();
            let imported = import_snapshot(&json).unwrap();
            assert_eq!(
                imported.summary.metrics.weighted_interest_rate,
                envelope.summary.metrics.weighted_interest_rate
            );
            assert_eq!(imported, envelope);
        }
    }

    #[test]
    fn test_snapshot_keeps_raw_records_untouched() {
        let json = export_snapshot(&sample(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["financialData"]["debts"][1]["balance"], "1,250.50");
        assert_eq!(value["summary"]["metrics"]["netWorthChange"], 200.0);
    }

    #[test]
    fn test_import_rejects_other_schema() {
        let mut envelope = sample();
        envelope.export_info.schema_version = "0.1.0".to_string();
        let json = export_snapshot(&envelope, false).unwrap();
        assert!(import_snapshot(&json).is_err());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            import_snapshot("{not json"),
            Err(ReportError::Export(_))
        ));
    }
}
