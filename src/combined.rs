//! Defines the route handler that seeds the database and reports on a month in one request.

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    import::{ImportState, InitDbResponse, run_import},
    query_params::{MonthParams, query_or_invalid},
    statistics::{
        ChartData, StatisticsState, SummaryStatistics, bar_chart, get_month_transactions,
        group_by_category, pie_chart, price_histogram, summarize,
    },
};

/// The import result and every monthly report.
#[derive(Debug, Serialize)]
pub struct CombinedData {
    /// The result of importing the seed document.
    #[serde(rename = "initDBData")]
    pub init_db_data: InitDbResponse,
    /// The month's sales totals.
    #[serde(rename = "statisticsData")]
    pub statistics_data: SummaryStatistics,
    /// The month's price histogram.
    #[serde(rename = "barChartData")]
    pub bar_chart_data: ChartData,
    /// The month's category distribution.
    #[serde(rename = "pieChartData")]
    pub pie_chart_data: ChartData,
}

/// Import the seed document, then compute the statistics and charts for a month.
///
/// The month is validated before anything is imported. If any step fails the
/// whole request fails.
pub async fn get_combined_data(
    State(state): State<AppState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<CombinedData>, Error> {
    let month = query_or_invalid(query)?.month()?;

    let init_db_data = run_import(&ImportState::from_ref(&state)).await?;
    let transactions = get_month_transactions(&StatisticsState::from_ref(&state), month)?;

    Ok(Json(CombinedData {
        init_db_data,
        statistics_data: summarize(&transactions),
        bar_chart_data: bar_chart(price_histogram(&transactions)),
        pie_chart_data: pie_chart(group_by_category(&transactions)),
    }))
}
