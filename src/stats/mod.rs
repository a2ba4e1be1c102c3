//! Stats module - Statistical calculations

mod calculator;

pub use calculator::{ColumnSummary, CorrelationMatrix, StatsCalculator};
