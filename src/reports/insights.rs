//! Narrative sentences and rule-based recommendations
//!
//! Everything here reads only `SummaryMetrics` and `DatasetCounts`, so the
//! wording can be tested without laying out a document.

use crate::display::format::{
    format_count, format_currency, format_percent, format_percent_opt, format_signed_currency,
    format_signed_percent,
};
use crate::models::RecordKind;

use super::metrics::{DatasetCounts, SummaryMetrics};

/// Utilization above this is a warning
pub const HIGH_UTILIZATION: f64 = 50.0;
/// Utilization above this is a caution
pub const TARGET_UTILIZATION: f64 = 30.0;
/// Debt-to-income above this is a warning
pub const HIGH_DEBT_TO_INCOME: f64 = 40.0;
/// Balance-weighted APR above this earns a payoff-order hint
pub const HIGH_INTEREST_RATE: f64 = 15.0;

/// How an insight should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Positive,
    Info,
    Caution,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Strength",
            Self::Info => "Note",
            Self::Caution => "Watch",
            Self::Warning => "Action",
        }
    }
}

/// One recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub severity: Severity,
    pub text: String,
}

impl Insight {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Text prefixed with the severity label
    pub fn labeled(&self) -> String {
        format!("{}: {}", self.severity.label(), self.text)
    }
}

/// Narrative sentences summarizing the data that exists
///
/// Empty when there is nothing to say.
pub fn narrative(metrics: &SummaryMetrics, counts: &DatasetCounts, symbol: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(net_worth) = metrics.net_worth {
        let mut line = format!("Net worth stands at {}", format_currency(net_worth, symbol));
        if let Some(change) = metrics.net_worth_change {
            line.push_str(&format!(
                " ({}{} versus the previous snapshot)",
                format_signed_currency(change, symbol),
                metrics
                    .net_worth_change_percent
                    .map(|p| format!(", {}", format_signed_percent(p)))
                    .unwrap_or_default()
            ));
        }
        line.push('.');
        lines.push(line);
    }

    if counts.has(RecordKind::Debts) {
        lines.push(format!(
            "Tracking {} totaling {} with minimum payments of {} per month.",
            format_count(counts.debts, "debt", "debts"),
            format_currency(metrics.total_debt, symbol),
            format_currency(metrics.minimum_payment_total, symbol)
        ));
        if metrics.credit_limit > 0.0 || metrics.credit_balance > 0.0 {
            lines.push(format!(
                "Revolving credit: {} used of {} available ({} utilization).",
                format_currency(metrics.credit_balance, symbol),
                format_currency(metrics.credit_limit, symbol),
                format_percent(metrics.credit_utilization)
            ));
        }
    }

    if counts.has(RecordKind::Budgets) {
        lines.push(format!(
            "Income of {} against actual spending of {} leaves net cash flow of {}.",
            format_currency(metrics.income_total, symbol),
            format_currency(metrics.expense_actual, symbol),
            format_signed_currency(metrics.net_cash_flow, symbol)
        ));
    }

    if counts.has(RecordKind::SavingsGoals) {
        lines.push(format!(
            "Saved {} toward {} across {} ({} funded, {} complete).",
            format_currency(metrics.savings_saved, symbol),
            format_currency(metrics.savings_target, symbol),
            format_count(counts.savings_goals, "goal", "goals"),
            format_percent_opt(metrics.savings_progress),
            metrics.goals_completed
        ));
    }

    if counts.has(RecordKind::ActivityEvents) {
        lines.push(format!(
            "{} recorded in the activity log.",
            format_count(counts.activity_events, "event", "events")
        ));
    }

    lines
}

/// Rule-based recommendations from metric thresholds
pub fn insights(metrics: &SummaryMetrics, counts: &DatasetCounts, symbol: &str) -> Vec<Insight> {
    let mut found = Vec::new();

    if counts.has(RecordKind::Debts) && (metrics.credit_limit > 0.0 || metrics.credit_balance > 0.0)
    {
        let utilization = format_percent(metrics.credit_utilization);
        if metrics.credit_utilization > HIGH_UTILIZATION {
            found.push(Insight::new(
                Severity::Warning,
                format!(
                    "Credit utilization is {}, above 50%. Paying revolving balances below 30% of their limits should be the first priority.",
                    utilization
                ),
            ));
        } else if metrics.credit_utilization > TARGET_UTILIZATION {
            found.push(Insight::new(
                Severity::Caution,
                format!(
                    "Credit utilization is {}. Bringing it under 30% would strengthen your credit profile.",
                    utilization
                ),
            ));
        } else {
            found.push(Insight::new(
                Severity::Positive,
                format!(
                    "Credit utilization is {}, within the recommended 30%.",
                    utilization
                ),
            ));
        }
    }

    if let Some(rate) = metrics.weighted_interest_rate {
        if rate > HIGH_INTEREST_RATE {
            found.push(Insight::new(
                Severity::Caution,
                format!(
                    "Average interest across debts is {}. Directing extra payments to the highest-rate balance first minimizes interest paid.",
                    format_percent(rate)
                ),
            ));
        }
    }

    if let Some(ratio) = metrics.debt_to_income_ratio {
        if ratio > HIGH_DEBT_TO_INCOME {
            found.push(Insight::new(
                Severity::Warning,
                format!(
                    "Total debt equals {} of recorded income.",
                    format_percent(ratio)
                ),
            ));
        }
    }

    if counts.has(RecordKind::Budgets) {
        if metrics.net_cash_flow > 0.0 {
            found.push(Insight::new(
                Severity::Positive,
                format!(
                    "Cash flow is positive by {}. Consider assigning the surplus to debt payoff or savings goals.",
                    format_currency(metrics.net_cash_flow, symbol)
                ),
            ));
        } else if metrics.net_cash_flow < 0.0 {
            found.push(Insight::new(
                Severity::Warning,
                format!(
                    "Spending exceeds income by {}. Review the largest expense categories first.",
                    format_currency(metrics.net_cash_flow.abs(), symbol)
                ),
            ));
        } else {
            found.push(Insight::new(
                Severity::Info,
                "Income and spending are exactly balanced; there is no margin for unexpected costs.",
            ));
        }

        if metrics.expense_budgeted > 0.0 && metrics.budget_variance < 0.0 {
            found.push(Insight::new(
                Severity::Caution,
                format!(
                    "Spending is over budget by {}.",
                    format_currency(metrics.budget_variance.abs(), symbol)
                ),
            ));
        }
    }

    match metrics.savings_progress {
        Some(progress)
            if progress >= 100.0 && metrics.goals_completed == counts.savings_goals =>
        {
            found.push(Insight::new(
                Severity::Positive,
                "Every savings target is fully funded. Time to set the next goal.",
            ))
        }
        Some(progress) if progress >= 100.0 => found.push(Insight::new(
            Severity::Info,
            format!(
                "Combined savings cover {} of the total target, but only {} of {} are complete.",
                format_percent(progress),
                metrics.goals_completed,
                format_count(counts.savings_goals, "goal", "goals")
            ),
        )),
        Some(progress) if progress >= 75.0 => found.push(Insight::new(
            Severity::Positive,
            format!("Savings goals are {} funded and nearly complete.", format_percent(progress)),
        )),
        Some(progress) if progress >= 50.0 => found.push(Insight::new(
            Severity::Info,
            format!("Savings goals are {} funded, past the halfway mark.", format_percent(progress)),
        )),
        Some(progress) => found.push(Insight::new(
            Severity::Caution,
            format!(
                "Savings goals are {} funded. Automating a fixed monthly contribution keeps them moving.",
                format_percent(progress)
            ),
        )),
        None if !counts.has(RecordKind::SavingsGoals) => found.push(Insight::new(
            Severity::Info,
            "No savings goals yet. An emergency fund covering three months of expenses is a common first goal.",
        )),
        None => {}
    }

    if let Some(change) = metrics.net_worth_change {
        if change > 0.0 {
            found.push(Insight::new(
                Severity::Positive,
                format!(
                    "Net worth grew by {} since the previous snapshot.",
                    format_currency(change, symbol)
                ),
            ));
        } else if change < 0.0 {
            found.push(Insight::new(
                Severity::Caution,
                format!(
                    "Net worth fell by {} since the previous snapshot.",
                    format_currency(change.abs(), symbol)
                ),
            ));
        }
    }

    if found.is_empty() {
        found.push(Insight::new(
            Severity::Info,
            "Add debts, budgets and savings goals to unlock personalized recommendations.",
        ));
    }

    found
}

/// Static closing checklist
pub fn next_steps() -> Vec<String> {
    vec![
        "Review this report monthly and record a fresh net worth snapshot.".to_string(),
        "Keep debt balances and credit limits current so utilization stays accurate.".to_string(),
        "Log actual spending against each budget category before the month closes.".to_string(),
        "Revisit savings goal targets and dates after any change in income.".to_string(),
    ]
}
