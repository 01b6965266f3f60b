//! Debt model
//!
//! A typed view over a raw debt record.

use serde_json::Value;

use super::coerce;

/// Debt type string marking a revolving credit card
pub const CREDIT_CARD_TYPE: &str = "credit_card";

/// A debt read leniently from a raw record
#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    /// Display name
    pub name: String,
    /// Outstanding balance (never negative)
    pub balance: f64,
    /// Annual interest rate in percent
    pub interest_rate: Option<f64>,
    /// Required minimum monthly payment
    pub minimum_payment: Option<f64>,
    /// Credit limit; `Some` whenever the record carries the field at all
    pub credit_limit: Option<f64>,
    /// Free-form type (`credit_card`, `loan`, ...)
    pub debt_type: Option<String>,
}

impl Debt {
    /// Read a debt from a raw record
    pub fn from_value(record: &Value) -> Self {
        Self {
            name: coerce::text(coerce::first_field(record, &["name", "title", "lender"]))
                .unwrap_or_else(|| "Unnamed debt".to_string()),
            balance: coerce::number(coerce::field(record, "balance")).max(0.0),
            interest_rate: coerce::optional_number(coerce::first_field(
                record,
                &["interestRate", "apr"],
            )),
            minimum_payment: coerce::optional_number(coerce::field(record, "minimumPayment")),
            credit_limit: coerce::optional_number(coerce::field(record, "creditLimit")),
            debt_type: coerce::text(coerce::field(record, "type")),
        }
    }

    /// Revolving debts count towards credit utilization
    pub fn is_revolving(&self) -> bool {
        self.debt_type.as_deref() == Some(CREDIT_CARD_TYPE) || self.credit_limit.is_some()
    }

    /// Type label for display
    pub fn type_label(&self) -> String {
        match self.debt_type.as_deref() {
            Some(CREDIT_CARD_TYPE) => "Credit card".to_string(),
            Some(other) => {
                let spaced = other.replace('_', " ");
                let mut chars = spaced.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "Other".to_string(),
                }
            }
            None if self.credit_limit.is_some() => "Revolving".to_string(),
            None => "Other".to_string(),
        }
    }
}
