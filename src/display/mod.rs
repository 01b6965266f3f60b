//! Display formatting
//!
//! Value formatting shared by every export, plus terminal tables for the
//! `summary` command.

pub mod format;
pub mod summary;

pub use format::{
    format_count, format_currency, format_currency_opt, format_datetime, format_percent,
    format_percent_opt, format_signed_currency, format_signed_percent, truncate, PLACEHOLDER,
};
pub use summary::{format_coverage_table, format_metrics_table, format_summary};
