//! Financial report generation.
//!
//! This module provides pure business logic for the financial report:
//! - Total paid amount over a filtered payment set
//! - Monthly revenue/expense/profit breakdown
//! - Per-teacher revenue, salary billing, and efficiency
//! - Per-language revenue
//! - Flattened detail rows

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
