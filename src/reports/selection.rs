//! Top-N selection for report sections
//!
//! Sorting is stable and descending, so records with equal keys keep their
//! original order.

use std::cmp::Ordering;

use crate::models::{
    ActivityEvent, Debt, ExpenseLine, NetWorthEntry, RawRecordSet, SavingsGoal,
};

/// Fewest rows a top-N section shows
pub const MIN_TOP_N: usize = 4;
/// Most rows a top-N section shows
pub const MAX_TOP_N: usize = 6;

/// Clamp a configured top-N into the supported range
pub fn clamp_top_n(n: usize) -> usize {
    n.clamp(MIN_TOP_N, MAX_TOP_N)
}

/// Stable descending sort by `key`, truncated to `n`
pub fn top_by<T, F>(mut items: Vec<T>, n: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    items.truncate(n);
    items
}

/// Largest debts by balance
pub fn top_debts(records: &RawRecordSet, n: usize) -> Vec<Debt> {
    top_by(records.debts(), clamp_top_n(n), |d| d.balance)
}

/// Largest expense lines by actual spending, across every plan
pub fn top_expenses(records: &RawRecordSet, n: usize) -> Vec<ExpenseLine> {
    let lines: Vec<ExpenseLine> = records
        .budget_plans()
        .into_iter()
        .flat_map(|plan| plan.expenses)
        .collect();
    top_by(lines, clamp_top_n(n), ExpenseLine::actual)
}

/// Savings goals closest to completion
pub fn top_goals(records: &RawRecordSet, n: usize) -> Vec<SavingsGoal> {
    top_by(records.savings_goals(), clamp_top_n(n), SavingsGoal::completion_ratio)
}

/// The last `n` history entries, oldest first
pub fn latest_history(records: &RawRecordSet, n: usize) -> Vec<NetWorthEntry> {
    let history = records.net_worth_history();
    let skip = history.len().saturating_sub(n);
    history.into_iter().skip(skip).collect()
}

/// The `n` most recent activity events, newest first
pub fn latest_activity(records: &RawRecordSet, n: usize) -> Vec<ActivityEvent> {
    records.recent_activity(n)
}
