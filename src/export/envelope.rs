//! Export envelope
//!
//! The single structure every export format is derived from: who the data
//! belongs to, the raw records as aggregated, and the derived summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::Settings;
use crate::error::ReportResult;
use crate::models::{AccountProfile, RawRecordSet};
use crate::reports::{calculate, DatasetCounts, SummaryMetrics};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Provenance of one export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    /// Unique id of this export
    pub export_id: Uuid,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Product name the export was branded with
    pub product: String,
}

/// Derived numbers shipped alongside the raw data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub metrics: SummaryMetrics,
    pub dataset_counts: DatasetCounts,
}

/// Presentation preferences recorded in the envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSettingsView<'a> {
    product_name: &'a str,
    currency_symbol: &'a str,
    date_format: &'a str,
    top_n: usize,
}

/// Everything one export describes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub export_info: ExportInfo,
    pub account: AccountProfile,
    pub user_settings: Value,
    pub financial_data: RawRecordSet,
    pub summary: ExportSummary,
}

impl ExportEnvelope {
    /// Build an envelope, deriving metrics and counts from `records`
    pub fn build(
        records: RawRecordSet,
        profile: &AccountProfile,
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> ReportResult<Self> {
        let metrics = calculate(&records);
        Self::with_metrics(records, metrics, profile, settings, generated_at)
    }

    /// Build an envelope from already-calculated metrics
    pub fn with_metrics(
        records: RawRecordSet,
        metrics: SummaryMetrics,
        profile: &AccountProfile,
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> ReportResult<Self> {
        let dataset_counts = DatasetCounts::from_records(&records);
        let user_settings = serde_json::to_value(UserSettingsView {
            product_name: &settings.product_name,
            currency_symbol: &settings.currency_symbol,
            date_format: &settings.date_format,
            top_n: settings.effective_top_n(),
        })?;

        Ok(Self {
            export_info: ExportInfo {
                export_id: Uuid::new_v4(),
                generated_at,
                app_version: env!("CARGO_PKG_VERSION").to_string(),
                schema_version: EXPORT_SCHEMA_VERSION.to_string(),
                product: settings.product_name.clone(),
            },
            account: profile.stamped(generated_at),
            user_settings,
            financial_data: records,
            summary: ExportSummary {
                metrics,
                dataset_counts,
            },
        })
    }

    /// Currency symbol recorded in the envelope, `$` when absent
    pub fn currency_symbol(&self) -> &str {
        self.user_settings
            .get("currencySymbol")
            .and_then(Value::as_str)
            .unwrap_or("$")
    }

    /// Validate the envelope structure
    pub fn validate(&self) -> Result<(), String> {
        if self.export_info.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.export_info.schema_version
            ));
        }

        let counted = DatasetCounts::from_records(&self.financial_data);
        if counted != self.summary.dataset_counts {
            return Err(format!(
                "Dataset counts do not match the records: expected {} records, found {}",
                self.summary.dataset_counts.total_datasets, counted.total_datasets
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> ExportEnvelope {
        let records = RawRecordSet::new().with(
            RecordKind::Debts,
            vec![json!({"name": "Visa", "balance": 500, "creditLimit": 2000})],
        );
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        ExportEnvelope::build(records, &AccountProfile::anonymous(), &Settings::default(), at)
            .unwrap()
    }

    #[test]
    fn test_build_derives_summary() {
        let envelope = sample();
        assert_eq!(envelope.summary.metrics.total_debt, 500.0);
        assert_eq!(envelope.summary.dataset_counts.debts, 1);
        assert_eq!(envelope.summary.dataset_counts.total_datasets, 1);
        assert_eq!(envelope.export_info.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(
            envelope.account.generated_at,
            envelope.export_info.generated_at
        );
        assert!(envelope.validate().is_ok());
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        for key in ["exportInfo", "account", "userSettings", "financialData", "summary"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["summary"]["metrics"]["savingsProgress"].is_null());
        assert_eq!(value["financialData"]["budgets"], json!([]));
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(sample().currency_symbol(), "$");
    }

    #[test]
    fn test_validate_rejects_mismatched_counts() {
        let mut envelope = sample();
        envelope.summary.dataset_counts.debts = 3;
        assert!(envelope.validate().is_err());
    }
}
