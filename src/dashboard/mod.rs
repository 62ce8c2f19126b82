//! Dashboard module
//!
//! Builds the monthly report: per-type totals, the derived balance, percentage
//! shares and the per-category expense breakdown.

mod aggregation;
mod handlers;
mod query;
mod report;

pub use handlers::get_dashboard_report;
pub use report::{CategoryExpense, REPORT_YEAR, Report, TypePercentages, build_report};
