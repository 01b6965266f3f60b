//! Report computations
//!
//! Summary metrics, top-N selections and the insight rules that feed every
//! export format.

pub mod insights;
pub mod metrics;
pub mod selection;

pub use insights::{insights, narrative, next_steps, Insight, Severity};
pub use metrics::{calculate, credit_utilization, DatasetCounts, SummaryMetrics};
pub use selection::{clamp_top_n, MAX_TOP_N, MIN_TOP_N};
