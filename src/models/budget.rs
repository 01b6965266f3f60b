//! Budget plan model
//!
//! A plan holds income lines and expense lines. Expense lines may carry
//! `budgeted`, `spent`, or only a single `amount` used for both.

use serde_json::Value;

use super::coerce;

/// One source of income
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeLine {
    pub name: Option<String>,
    pub amount: f64,
}

/// One expense category line
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLine {
    pub category: String,
    pub budgeted: Option<f64>,
    pub spent: Option<f64>,
    pub amount: Option<f64>,
}

impl ExpenseLine {
    /// Actual spending: `spent`, else `amount`, else zero
    pub fn actual(&self) -> f64 {
        self.spent.or(self.amount).unwrap_or(0.0)
    }

    /// Planned spending: `budgeted`, else `amount`, else zero
    pub fn planned(&self) -> f64 {
        self.budgeted.or(self.amount).unwrap_or(0.0)
    }

    /// Planned minus actual
    pub fn variance(&self) -> f64 {
        self.planned() - self.actual()
    }
}

/// A budget plan read leniently from a raw record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetPlan {
    /// Month key when the plan came from a month-keyed map
    pub month: Option<String>,
    pub incomes: Vec<IncomeLine>,
    pub expenses: Vec<ExpenseLine>,
}

impl BudgetPlan {
    /// Read a plan from a raw record
    pub fn from_value(record: &Value) -> Self {
        let incomes = lines(record, &["incomes", "income"])
            .map(|line| IncomeLine {
                name: coerce::text(coerce::first_field(line, &["name", "source", "label"])),
                amount: coerce::number(coerce::field(line, "amount")),
            })
            .collect();

        let expenses = lines(record, &["expenses"])
            .map(|line| ExpenseLine {
                category: coerce::text(coerce::first_field(line, &["category", "name"]))
                    .unwrap_or_else(|| "Uncategorized".to_string()),
                budgeted: coerce::optional_number(coerce::field(line, "budgeted")),
                spent: coerce::optional_number(coerce::field(line, "spent")),
                amount: coerce::optional_number(coerce::field(line, "amount")),
            })
            .collect();

        Self {
            month: coerce::text(coerce::first_field(record, &["month", "period"])),
            incomes,
            expenses,
        }
    }

    /// Sum of income amounts
    pub fn income_total(&self) -> f64 {
        self.incomes.iter().map(|i| i.amount).sum()
    }

    /// Sum of actual spending
    pub fn expense_actual(&self) -> f64 {
        self.expenses.iter().map(ExpenseLine::actual).sum()
    }

    /// Sum of planned spending
    pub fn expense_budgeted(&self) -> f64 {
        self.expenses.iter().map(ExpenseLine::planned).sum()
    }
}

fn lines<'a>(record: &'a Value, keys: &[&str]) -> impl Iterator<Item = &'a Value> {
    coerce::first_field(record, keys)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}
