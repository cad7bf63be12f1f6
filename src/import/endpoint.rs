//! Defines the route handler that seeds the database from the remote seed document.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{AppState, Error};

use super::seed::{ImportSummary, fetch_seed_records, import_seed_records};

/// The state needed for importing the seed document.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The database connection for storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the seed document.
    pub http_client: reqwest::Client,
    /// Where to download the seed document from.
    pub seed_url: String,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The response body for a completed import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitDbResponse {
    /// A human readable status message.
    pub message: &'static str,
    /// How many records were imported, already present or skipped.
    #[serde(flatten)]
    pub summary: ImportSummary,
}

/// Download the seed document and store its records.
///
/// The download completes before the database lock is taken.
pub(crate) async fn run_import(state: &ImportState) -> Result<InitDbResponse, Error> {
    let records = fetch_seed_records(&state.http_client, &state.seed_url)
        .await
        .inspect_err(|error| tracing::error!("could not load seed document: {error}"))?;

    let summary = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        import_seed_records(records, &connection)
            .inspect_err(|error| tracing::error!("could not import seed records: {error}"))?
    };

    tracing::info!(
        "Imported {} records ({} duplicates, {} skipped) from {}",
        summary.imported,
        summary.duplicates,
        summary.skipped,
        state.seed_url
    );

    Ok(InitDbResponse {
        message: "Database initialized successfully",
        summary,
    })
}

/// Seed the database from the configured seed URL.
///
/// Safe to call repeatedly: records that were already imported are not duplicated.
pub async fn init_db(State(state): State<ImportState>) -> Result<Json<InitDbResponse>, Error> {
    run_import(&state).await.map(Json)
}
