//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    combined::get_combined_data,
    endpoints,
    import::init_db,
    not_found::get_404_not_found,
    statistics::{get_bar_chart, get_pie_chart, get_statistics},
    transaction::get_transactions,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::INIT_DB, get(init_db))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::MONTHLY_STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED_DATA, get(get_combined_data))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' greets the client.
async fn get_index_page() -> &'static str {
    "Welcome to the sales dashboard API!"
}
