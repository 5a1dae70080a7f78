//! Stats module - descriptive statistics and grouped aggregates

mod calculator;
pub mod columns;
pub mod grouping;

pub use calculator::{ColumnSummary, CorrelationMatrix, StatsCalculator, Trend};
