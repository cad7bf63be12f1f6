//! Route handlers for the monthly statistics and charts.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use time::Month;

use crate::{
    AppState, Error,
    month::resolve_month_range,
    query_params::{MonthParams, query_or_invalid},
    transaction::{Transaction, get_transactions_in_range},
};

use super::{
    aggregation::{SummaryStatistics, group_by_category, price_histogram, summarize},
    charts::{ChartData, bar_chart, pie_chart},
};

/// The state needed for computing statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Load every transaction sold in `month`, or in the current month if `month` is `None`.
pub(crate) fn get_month_transactions(
    state: &StatisticsState,
    month: Option<Month>,
) -> Result<Vec<Transaction>, Error> {
    let date_range = resolve_month_range(month, &state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transactions_in_range(date_range, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions for month: {error}"))
}

fn requested_month(
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Option<Month>, Error> {
    query_or_invalid(query)?.month()
}

/// Get the total sale amount and the sold and unsold counts for a month.
pub async fn get_statistics(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<SummaryStatistics>, Error> {
    let transactions = get_month_transactions(&state, requested_month(query)?)?;

    Ok(Json(summarize(&transactions)))
}

/// Get the month's price histogram as chart data.
pub async fn get_bar_chart(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<ChartData>, Error> {
    let transactions = get_month_transactions(&state, requested_month(query)?)?;

    Ok(Json(bar_chart(price_histogram(&transactions))))
}

/// Get the month's transaction count per category as chart data.
pub async fn get_pie_chart(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<ChartData>, Error> {
    let transactions = get_month_transactions(&state, requested_month(query)?)?;

    Ok(Json(pie_chart(group_by_category(&transactions))))
}
