//! Summary metrics
//!
//! Derives the canonical scalar metrics from a raw record set. Calculation is
//! pure and total: malformed numbers read as zero, and every field is either
//! a finite number or `None` ("no data", serialized as `null`).

use serde::{Deserialize, Serialize};

use crate::models::coerce::{finite, finite_or_zero};
use crate::models::{RawRecordSet, RecordKind};

/// Scalar metrics derived from a record set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    // Debt
    pub total_debt: f64,
    pub credit_balance: f64,
    pub credit_limit: f64,
    pub credit_utilization: f64,
    pub minimum_payment_total: f64,
    /// Balance-weighted interest rate; `None` when there is no debt
    pub weighted_interest_rate: Option<f64>,

    // Net worth
    pub net_worth: Option<f64>,
    pub net_worth_change: Option<f64>,
    pub net_worth_change_percent: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,

    // Savings
    pub savings_saved: f64,
    pub savings_target: f64,
    pub savings_progress: Option<f64>,
    pub goals_completed: usize,

    // Cash flow
    pub income_total: f64,
    pub expense_actual: f64,
    pub expense_budgeted: f64,
    pub net_cash_flow: f64,
    pub budget_variance: f64,
    pub savings_rate: Option<f64>,
    pub debt_to_income_ratio: Option<f64>,
}

/// Record counts per kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    pub debts: usize,
    pub budgets: usize,
    pub savings_goals: usize,
    pub net_worth_history: usize,
    pub velocity_scenarios: usize,
    pub tax_scenarios: usize,
    pub activity_events: usize,
    pub total_datasets: usize,
}

impl DatasetCounts {
    /// Count the records of each kind
    pub fn from_records(records: &RawRecordSet) -> Self {
        Self {
            debts: records.count(RecordKind::Debts),
            budgets: records.count(RecordKind::Budgets),
            savings_goals: records.count(RecordKind::SavingsGoals),
            net_worth_history: records.count(RecordKind::NetWorthHistory),
            velocity_scenarios: records.count(RecordKind::VelocityScenarios),
            tax_scenarios: records.count(RecordKind::TaxScenarios),
            activity_events: records.count(RecordKind::ActivityEvents),
            total_datasets: records.total(),
        }
    }

    /// Count for one kind
    pub fn get(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Debts => self.debts,
            RecordKind::Budgets => self.budgets,
            RecordKind::SavingsGoals => self.savings_goals,
            RecordKind::NetWorthHistory => self.net_worth_history,
            RecordKind::VelocityScenarios => self.velocity_scenarios,
            RecordKind::TaxScenarios => self.tax_scenarios,
            RecordKind::ActivityEvents => self.activity_events,
        }
    }

    /// True when the kind has at least one record
    pub fn has(&self, kind: RecordKind) -> bool {
        self.get(kind) > 0
    }
}

/// Derive summary metrics from raw records
pub fn calculate(records: &RawRecordSet) -> SummaryMetrics {
    let mut metrics = SummaryMetrics::default();
    apply_debts(records, &mut metrics);
    apply_net_worth(records, &mut metrics);
    apply_savings(records, &mut metrics);
    apply_cash_flow(records, &mut metrics);

    metrics.debt_to_income_ratio = ratio_percent(metrics.total_debt, metrics.income_total);
    metrics
}

fn apply_debts(records: &RawRecordSet, metrics: &mut SummaryMetrics) {
    let debts = records.debts();

    let mut weighted_rate_sum = 0.0;
    for debt in &debts {
        metrics.total_debt += debt.balance;
        metrics.minimum_payment_total += debt.minimum_payment.unwrap_or(0.0).max(0.0);
        weighted_rate_sum += debt.balance * debt.interest_rate.unwrap_or(0.0);

        if debt.is_revolving() {
            metrics.credit_balance += debt.balance;
            metrics.credit_limit += debt.credit_limit.unwrap_or(0.0);
        }
    }

    metrics.total_debt = finite_or_zero(metrics.total_debt);
    metrics.credit_balance = finite_or_zero(metrics.credit_balance);
    metrics.credit_limit = finite_or_zero(metrics.credit_limit);
    metrics.minimum_payment_total = finite_or_zero(metrics.minimum_payment_total);

    metrics.credit_utilization = credit_utilization(metrics.credit_balance, metrics.credit_limit);
    metrics.weighted_interest_rate = if metrics.total_debt > 0.0 {
        finite(weighted_rate_sum / metrics.total_debt)
    } else {
        None
    };
}

/// Credit utilization in percent
///
/// With no usable limit, any outstanding balance counts as fully utilized.
pub fn credit_utilization(balance: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        finite_or_zero(balance / limit * 100.0)
    } else if balance > 0.0 {
        100.0
    } else {
        0.0
    }
}

fn apply_net_worth(records: &RawRecordSet, metrics: &mut SummaryMetrics) {
    let history = records.net_worth_history();
    let Some(latest) = history.last() else {
        return;
    };

    metrics.net_worth = Some(latest.net_worth);
    metrics.total_assets = latest.assets;
    metrics.total_liabilities = latest.liabilities;

    if history.len() >= 2 {
        let previous = history[history.len() - 2].net_worth;
        let change = finite_or_zero(latest.net_worth - previous);
        metrics.net_worth_change = Some(change);
        metrics.net_worth_change_percent = if previous != 0.0 {
            finite(change / previous.abs() * 100.0)
        } else {
            None
        };
    }
}

fn apply_savings(records: &RawRecordSet, metrics: &mut SummaryMetrics) {
    let goals = records.savings_goals();

    metrics.savings_saved = finite_or_zero(goals.iter().map(|g| g.saved).sum());
    metrics.savings_target = finite_or_zero(goals.iter().map(|g| g.target).sum());
    metrics.goals_completed = goals.iter().filter(|g| g.is_complete()).count();
    metrics.savings_progress = if metrics.savings_target > 0.0 {
        finite(metrics.savings_saved / metrics.savings_target * 100.0)
    } else {
        None
    };
}

fn apply_cash_flow(records: &RawRecordSet, metrics: &mut SummaryMetrics) {
    let plans = records.budget_plans();

    metrics.income_total = finite_or_zero(plans.iter().map(|p| p.income_total()).sum());
    metrics.expense_actual = finite_or_zero(plans.iter().map(|p| p.expense_actual()).sum());
    metrics.expense_budgeted = finite_or_zero(plans.iter().map(|p| p.expense_budgeted()).sum());
    metrics.net_cash_flow = finite_or_zero(metrics.income_total - metrics.expense_actual);
    metrics.budget_variance = finite_or_zero(metrics.expense_budgeted - metrics.expense_actual);
    metrics.savings_rate = ratio_percent(metrics.net_cash_flow, metrics.income_total);
}

/// `numerator / denominator * 100`, `None` unless the denominator is positive
fn ratio_percent(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        finite(numerator / denominator * 100.0)
    } else {
        None
    }
}
