//! Raw record set and source payload shapes
//!
//! A `RawRecordSet` holds one array of loosely-typed records per kind. Stores
//! hand data back in several shapes; `SourcePayload` names each shape
//! explicitly and `SourcePayload::normalize` flattens all of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::activity::{self, ActivityEvent};
use super::budget::BudgetPlan;
use super::debt::Debt;
use super::kind::RecordKind;
use super::net_worth::{self, NetWorthEntry};
use super::savings::SavingsGoal;

/// The shape a store returned for one kind
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
    /// A bare array of records
    List(Vec<Value>),
    /// An object nesting the array under a property such as `history`
    Wrapped { key: String, items: Vec<Value> },
    /// A map of sub-records keyed by some id (budgets keyed by month)
    Keyed(Map<String, Value>),
    /// A single record object
    Single(Value),
    /// Nothing stored
    Empty,
}

impl SourcePayload {
    /// Classify a JSON document returned for `kind`
    pub fn from_json(kind: RecordKind, value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Array(items) => Self::List(items),
            Value::Object(mut obj) => {
                let wrapper = kind
                    .wrapper_keys()
                    .iter()
                    .find(|key| obj.get(**key).map(Value::is_array).unwrap_or(false));
                if let Some(key) = wrapper {
                    if let Some(Value::Array(items)) = obj.remove(*key) {
                        return Self::Wrapped {
                            key: (*key).to_string(),
                            items,
                        };
                    }
                }

                if obj.is_empty() {
                    Self::Empty
                } else if kind.allows_keyed_map() && is_keyed_map(kind, &obj) {
                    Self::Keyed(obj)
                } else {
                    Self::Single(Value::Object(obj))
                }
            }
            scalar => Self::Single(scalar),
        }
    }

    /// Flatten into an array of records
    ///
    /// Keyed entries become records in key order; when an entry is an object
    /// without a `month`, its key is recorded as the `month`.
    pub fn normalize(self) -> Vec<Value> {
        match self {
            Self::List(items) | Self::Wrapped { items, .. } => items,
            Self::Keyed(map) => map
                .into_iter()
                .map(|(key, value)| match value {
                    Value::Object(mut record) => {
                        record.entry("month").or_insert(Value::String(key));
                        Value::Object(record)
                    }
                    other => other,
                })
                .collect(),
            Self::Single(record) => vec![record],
            Self::Empty => Vec::new(),
        }
    }

    /// True when the payload holds no records
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) | Self::Wrapped { items, .. } => items.is_empty(),
            Self::Keyed(map) => map.is_empty(),
            Self::Single(_) => false,
            Self::Empty => true,
        }
    }
}

/// A budget object is a keyed map when it is not itself a plan and every
/// value is an object
fn is_keyed_map(kind: RecordKind, obj: &Map<String, Value>) -> bool {
    match kind {
        RecordKind::Budgets => {
            let looks_like_plan = ["incomes", "income", "expenses"]
                .iter()
                .any(|key| obj.contains_key(*key));
            !looks_like_plan && obj.values().all(Value::is_object)
        }
        _ => false,
    }
}

/// Aggregated raw records, one array per kind
///
/// Every kind is always present; a kind with no data is an empty array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecordSet {
    #[serde(default)]
    pub debts: Vec<Value>,
    #[serde(default)]
    pub budgets: Vec<Value>,
    #[serde(default)]
    pub savings_goals: Vec<Value>,
    #[serde(default)]
    pub net_worth_history: Vec<Value>,
    #[serde(default)]
    pub velocity_scenarios: Vec<Value>,
    #[serde(default)]
    pub tax_scenarios: Vec<Value>,
    #[serde(default)]
    pub activity_events: Vec<Value>,
}

impl RawRecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for a kind
    pub fn get(&self, kind: RecordKind) -> &[Value] {
        match kind {
            RecordKind::Debts => &self.debts,
            RecordKind::Budgets => &self.budgets,
            RecordKind::SavingsGoals => &self.savings_goals,
            RecordKind::NetWorthHistory => &self.net_worth_history,
            RecordKind::VelocityScenarios => &self.velocity_scenarios,
            RecordKind::TaxScenarios => &self.tax_scenarios,
            RecordKind::ActivityEvents => &self.activity_events,
        }
    }

    /// Replace the records for a kind
    pub fn set(&mut self, kind: RecordKind, records: Vec<Value>) {
        let slot = match kind {
            RecordKind::Debts => &mut self.debts,
            RecordKind::Budgets => &mut self.budgets,
            RecordKind::SavingsGoals => &mut self.savings_goals,
            RecordKind::NetWorthHistory => &mut self.net_worth_history,
            RecordKind::VelocityScenarios => &mut self.velocity_scenarios,
            RecordKind::TaxScenarios => &mut self.tax_scenarios,
            RecordKind::ActivityEvents => &mut self.activity_events,
        };
        *slot = records;
    }

    /// Builder-style variant of [`RawRecordSet::set`]
    pub fn with(mut self, kind: RecordKind, records: Vec<Value>) -> Self {
        self.set(kind, records);
        self
    }

    /// Number of records for a kind
    pub fn count(&self, kind: RecordKind) -> usize {
        self.get(kind).len()
    }

    /// Total records across all kinds
    pub fn total(&self) -> usize {
        RecordKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Iterate kinds with their records, in report order
    pub fn iter(&self) -> impl Iterator<Item = (RecordKind, &[Value])> {
        RecordKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn debts(&self) -> Vec<Debt> {
        self.debts.iter().map(Debt::from_value).collect()
    }

    pub fn budget_plans(&self) -> Vec<BudgetPlan> {
        self.budgets.iter().map(BudgetPlan::from_value).collect()
    }

    pub fn savings_goals(&self) -> Vec<SavingsGoal> {
        self.savings_goals
            .iter()
            .map(SavingsGoal::from_value)
            .collect()
    }

    /// Net worth history ordered ascending by date
    pub fn net_worth_history(&self) -> Vec<NetWorthEntry> {
        net_worth::sorted_history(&self.net_worth_history)
    }

    /// The `limit` most recent activity events
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEvent> {
        activity::most_recent(&self.activity_events, limit)
    }
}
