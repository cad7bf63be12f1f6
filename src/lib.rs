//! A sales dashboard backend.
//!
//! This library provides a REST API that serves sale transactions and
//! monthly statistics derived from them as JSON: summary totals, a price
//! histogram and a category distribution.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod combined;
mod db;
mod endpoints;
mod import;
mod logging;
mod month;
mod not_found;
mod pagination;
mod query_params;
mod routing;
mod statistics;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use import::{ImportSummary, SeedRecord, import_seed_records, parse_seed_document};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A query parameter was missing its expected type or was out of range.
    ///
    /// The string describes which parameter was rejected and is safe to
    /// return to the client.
    #[error("invalid input parameters: {0}")]
    InvalidParameters(String),

    /// A sale record had a price below zero.
    #[error("{0} is a negative price, which is not allowed")]
    NegativePrice(f64),

    /// The specified import ID already exists in the database.
    ///
    /// Seed records carry an external ID which is stored as the import ID.
    /// Rejecting duplicates keeps repeated imports from duplicating records.
    #[error("the import ID already exists in the database")]
    DuplicateImportId,

    /// The seed document could not be downloaded.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not fetch the seed document: {0}")]
    SeedFetchError(String),

    /// The seed document was not a JSON list of sale records.
    #[error("could not parse the seed document: {0}")]
    SeedParseError(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidParameters(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid input parameters", "details": details })),
            )
                .into_response(),
            Error::NotFound => not_found::get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                internal_server_error_response()
            }
        }
    }
}

/// The generic response for failures whose details stay in the server logs.
pub(crate) fn internal_server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
