//! Core data models for the report compiler
//!
//! Raw records stay loosely typed (`serde_json::Value`) inside a
//! `RawRecordSet`; the typed views here read them leniently when metrics or
//! report sections need concrete fields.

pub mod activity;
pub mod budget;
pub mod coerce;
pub mod debt;
pub mod kind;
pub mod money;
pub mod net_worth;
pub mod profile;
pub mod record_set;
pub mod savings;

pub use activity::ActivityEvent;
pub use budget::{BudgetPlan, ExpenseLine, IncomeLine};
pub use debt::Debt;
pub use kind::RecordKind;
pub use money::Money;
pub use net_worth::NetWorthEntry;
pub use profile::AccountProfile;
pub use record_set::{RawRecordSet, SourcePayload};
pub use savings::SavingsGoal;
