//! Shared handling for query string parameters.

use axum::extract::{Query, rejection::QueryRejection};
use serde::Deserialize;
use time::Month;

use crate::{Error, month::parse_month};

/// Unwrap query parameters, turning a malformed query string into
/// [Error::InvalidParameters] so the client gets a JSON error body.
pub(crate) fn query_or_invalid<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Error> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::InvalidParameters(rejection.body_text()))
}

/// Parse an optional positive integer parameter, treating an empty value as missing.
///
/// # Errors
/// Returns [Error::InvalidParameters] naming `name` if `raw` is not a non-negative integer.
pub(crate) fn parse_integer(name: &str, raw: Option<&str>) -> Result<Option<u64>, Error> {
    raw.filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse().map_err(|_| {
                Error::InvalidParameters(format!(
                    "{name} must be a positive integer, got \"{raw}\""
                ))
            })
        })
        .transpose()
}

/// The query parameters for endpoints that report on a single month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    /// Zero-based month index, 0 = January. Defaults to the current month.
    pub month: Option<String>,
}

impl MonthParams {
    /// The selected month, or `None` for the current month.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameters] if the month is not an integer in `0..=11`.
    pub fn month(&self) -> Result<Option<Month>, Error> {
        parse_month(self.month.as_deref())
    }
}
