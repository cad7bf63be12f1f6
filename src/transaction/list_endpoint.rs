//! Defines the route handler for listing a page of a month's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    AppState, Error,
    month::{parse_month, resolve_month_range},
    pagination::{Page, PaginationConfig, page_count},
    query_params::{parse_integer, query_or_invalid},
};

use super::{
    core::Transaction,
    query::{SearchTerm, TransactionQuery, count_matching_transactions, query_transactions},
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsListState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// Defaults for the page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query parameters for the transactions listing.
///
/// Values are kept as text so that every malformed value is reported the same way.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsParams {
    /// The page number to return. Starts from 1.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub per_page: Option<String>,
    /// Text to search for in titles and descriptions, or a price to match.
    pub search: Option<String>,
    /// Zero-based month index, 0 = January.
    pub month: Option<String>,
}

/// The listing parameters after defaults and validation have been applied.
#[derive(Debug, PartialEq)]
struct ListingOptions {
    page: Page,
    search: Option<SearchTerm>,
    month: Option<Month>,
}

fn validate_params(
    params: TransactionsParams,
    pagination_config: &PaginationConfig,
) -> Result<ListingOptions, Error> {
    let page_number = parse_integer("page", params.page.as_deref())?
        .unwrap_or(pagination_config.default_page);
    let page_size = parse_integer("perPage", params.per_page.as_deref())?
        .unwrap_or(pagination_config.default_page_size);

    Ok(ListingOptions {
        page: Page::new(page_number, page_size)?,
        search: params.search.as_deref().and_then(SearchTerm::new),
        month: parse_month(params.month.as_deref())?,
    })
}

/// A page of transactions and the number of pages for the same filters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPage {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The number of pages of transactions matching the month and search.
    pub total_pages: u64,
}

/// List a page of the transactions sold in a month, optionally filtered by a search.
///
/// All parameters are validated before the database is touched.
pub async fn get_transactions(
    State(state): State<TransactionsListState>,
    query: Result<Query<TransactionsParams>, QueryRejection>,
) -> Result<Json<TransactionsPage>, Error> {
    let params = query_or_invalid(query)?;
    let options = validate_params(params, &state.pagination_config)
        .inspect_err(|error| tracing::debug!("rejected transactions query: {error}"))?;

    let date_range = resolve_month_range(options.month, &state.local_timezone)?;
    let query = TransactionQuery {
        date_range,
        search: options.search,
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = query_transactions(&query, Some(options.page), &connection)
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;
    let matching_count = count_matching_transactions(&query, &connection)
        .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;

    Ok(Json(TransactionsPage {
        transactions,
        total_pages: page_count(matching_count, options.page.size),
    }))
}
