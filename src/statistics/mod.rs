//! Monthly sales statistics.
//!
//! This module contains:
//! - Aggregations over a month of transactions: totals, price histogram and category counts
//! - Chart-ready data built from the aggregations
//! - Route handlers for the statistics and chart endpoints

mod aggregation;
mod charts;
mod handlers;

pub use aggregation::{SummaryStatistics, group_by_category, price_histogram, summarize};
pub use charts::{ChartData, bar_chart, pie_chart};
pub use handlers::{StatisticsState, get_bar_chart, get_pie_chart, get_statistics};

pub(crate) use handlers::get_month_transactions;
