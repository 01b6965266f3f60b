//! Terminal summary of metrics and data coverage

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::RecordKind;
use crate::reports::{DatasetCounts, SummaryMetrics};

use super::format::{
    format_currency, format_currency_opt, format_percent, format_percent_opt,
    format_signed_currency, PLACEHOLDER,
};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct CoverageRow {
    #[tabled(rename = "Dataset")]
    dataset: &'static str,
    #[tabled(rename = "Records")]
    records: usize,
}

/// Format the summary metrics as a two-column table
pub fn format_metrics_table(metrics: &SummaryMetrics, symbol: &str) -> String {
    let change = metrics
        .net_worth_change
        .map(|c| format_signed_currency(c, symbol))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let rows = vec![
        MetricRow {
            metric: "Net worth",
            value: format_currency_opt(metrics.net_worth, symbol),
        },
        MetricRow {
            metric: "Net worth change",
            value: change,
        },
        MetricRow {
            metric: "Total debt",
            value: format_currency(metrics.total_debt, symbol),
        },
        MetricRow {
            metric: "Credit utilization",
            value: format_percent(metrics.credit_utilization),
        },
        MetricRow {
            metric: "Minimum payments",
            value: format_currency(metrics.minimum_payment_total, symbol),
        },
        MetricRow {
            metric: "Weighted interest rate",
            value: format_percent_opt(metrics.weighted_interest_rate),
        },
        MetricRow {
            metric: "Income",
            value: format_currency(metrics.income_total, symbol),
        },
        MetricRow {
            metric: "Spending",
            value: format_currency(metrics.expense_actual, symbol),
        },
        MetricRow {
            metric: "Net cash flow",
            value: format_signed_currency(metrics.net_cash_flow, symbol),
        },
        MetricRow {
            metric: "Savings rate",
            value: format_percent_opt(metrics.savings_rate),
        },
        MetricRow {
            metric: "Savings progress",
            value: format_percent_opt(metrics.savings_progress),
        },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format the per-kind record counts as a table
pub fn format_coverage_table(counts: &DatasetCounts) -> String {
    let mut rows: Vec<CoverageRow> = RecordKind::ALL
        .iter()
        .map(|kind| CoverageRow {
            dataset: kind.label(),
            records: counts.get(*kind),
        })
        .collect();
    rows.push(CoverageRow {
        dataset: "Total",
        records: counts.total_datasets,
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Both tables, separated by a blank line
pub fn format_summary(metrics: &SummaryMetrics, counts: &DatasetCounts, symbol: &str) -> String {
    format!(
        "{}\n\n{}",
        format_metrics_table(metrics, symbol),
        format_coverage_table(counts)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_table_uses_placeholders() {
        let output = format_metrics_table(&SummaryMetrics::default(), "$");
        assert!(output.contains("Net worth"));
        assert!(output.contains(PLACEHOLDER));
        assert!(output.contains("$0.00"));
    }

    #[test]
    fn test_coverage_table_lists_every_kind() {
        let counts = DatasetCounts {
            debts: 2,
            total_datasets: 2,
            ..DatasetCounts::default()
        };
        let output = format_coverage_table(&counts);
        for kind in RecordKind::ALL {
            assert!(output.contains(kind.label()));
        }
        assert!(output.contains("Total"));
    }
}
