//! Savings goal model

use serde_json::Value;

use super::coerce;

/// A savings goal read leniently from a raw record
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoal {
    pub name: String,
    pub target: f64,
    pub saved: f64,
    pub target_date: Option<String>,
}

impl SavingsGoal {
    /// Read a goal from a raw record
    pub fn from_value(record: &Value) -> Self {
        Self {
            name: coerce::text(coerce::first_field(record, &["name", "title"]))
                .unwrap_or_else(|| "Unnamed goal".to_string()),
            target: coerce::number(coerce::first_field(record, &["target", "targetAmount"])),
            saved: coerce::number(coerce::first_field(record, &["saved", "currentAmount"])),
            target_date: coerce::text(coerce::field(record, "targetDate")),
        }
    }

    /// Fraction saved (0 when the target is not positive)
    pub fn completion_ratio(&self) -> f64 {
        if self.target > 0.0 {
            coerce::finite_or_zero(self.saved / self.target)
        } else {
            0.0
        }
    }

    /// Reached or exceeded a positive target
    pub fn is_complete(&self) -> bool {
        self.target > 0.0 && self.saved >= self.target
    }
}
