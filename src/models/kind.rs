//! Record kinds
//!
//! The seven fixed categories of financial records the compiler aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed financial record categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Debts,
    Budgets,
    SavingsGoals,
    NetWorthHistory,
    VelocityScenarios,
    TaxScenarios,
    ActivityEvents,
}

impl RecordKind {
    /// Every kind, in report order
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Debts,
        RecordKind::Budgets,
        RecordKind::SavingsGoals,
        RecordKind::NetWorthHistory,
        RecordKind::VelocityScenarios,
        RecordKind::TaxScenarios,
        RecordKind::ActivityEvents,
    ];

    /// Stable key used in serialized output and source file names
    pub fn key(&self) -> &'static str {
        match self {
            Self::Debts => "debts",
            Self::Budgets => "budgets",
            Self::SavingsGoals => "savingsGoals",
            Self::NetWorthHistory => "netWorthHistory",
            Self::VelocityScenarios => "velocityScenarios",
            Self::TaxScenarios => "taxScenarios",
            Self::ActivityEvents => "activityEvents",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debts => "Debts",
            Self::Budgets => "Budget plans",
            Self::SavingsGoals => "Savings goals",
            Self::NetWorthHistory => "Net worth snapshots",
            Self::VelocityScenarios => "Debt velocity scenarios",
            Self::TaxScenarios => "Tax scenarios",
            Self::ActivityEvents => "Activity events",
        }
    }

    /// Property names under which a store may nest this kind's array
    ///
    /// Checked in order; the first one holding an array wins.
    pub fn wrapper_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Debts => &["debts", "items"],
            Self::Budgets => &["budgets", "plans"],
            Self::SavingsGoals => &["goals", "savingsGoals", "items"],
            Self::NetWorthHistory => &["history", "entries", "snapshots"],
            Self::VelocityScenarios => &["scenarios", "velocityScenarios"],
            Self::TaxScenarios => &["scenarios", "taxScenarios"],
            Self::ActivityEvents => &["events", "activity", "items"],
        }
    }

    /// Whether a store may keep this kind as a map of keyed sub-records
    /// (e.g. budgets keyed by month)
    pub fn allows_keyed_map(&self) -> bool {
        matches!(self, Self::Budgets)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown record kind: {}", s))
    }
}
