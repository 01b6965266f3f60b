//! Value formatting for reports
//!
//! Metrics keep full precision internally; rounding to one decimal happens
//! here, at presentation time. Anything missing or non-finite renders as an
//! em-dash placeholder.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::models::Money;

/// Placeholder shown for missing or unbounded values
pub const PLACEHOLDER: &str = "—";

/// Format an amount as currency
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return PLACEHOLDER.to_string();
    }
    Money::from_amount(amount).format_with_symbol(symbol)
}

/// Format an optional amount as currency
pub fn format_currency_opt(amount: Option<f64>, symbol: &str) -> String {
    match amount {
        Some(a) => format_currency(a, symbol),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format an amount with an explicit sign (`+$200.00`, `-$50.00`)
pub fn format_signed_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let money = Money::from_amount(amount);
    if money.is_negative() || money.is_zero() {
        money.format_with_symbol(symbol)
    } else {
        format!("+{}", money.format_with_symbol(symbol))
    }
}

/// Format a percentage with one decimal
pub fn format_percent(pct: f64) -> String {
    if !pct.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Avoid rendering "-0.0%"
    let rounded = (pct * 10.0).round() / 10.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}%", rounded)
}

/// Format an optional percentage with one decimal
pub fn format_percent_opt(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format_percent(p),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a signed percentage with one decimal (`+20.0%`)
pub fn format_signed_percent(pct: f64) -> String {
    let formatted = format_percent(pct);
    if pct.is_finite() && formatted != "0.0%" && pct > 0.0 {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

/// Format a count with a singular/plural noun
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a timestamp with a user-supplied strftime pattern
///
/// Patterns chrono cannot render fall back to `%Y-%m-%d`.
pub fn format_datetime(value: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", value.format(pattern)).is_err() {
        return value.format("%Y-%m-%d").to_string();
    }
    out
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
