//! Month selection and the month-bounded date ranges every statistic is scoped to.
//!
//! Clients select a month by its zero-based index (0 = January, 11 = December).
//! The year is always the current year in the server's local timezone.

use std::ops::Range;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::{
    Error,
    timezone::{get_local_offset, get_offset_at},
};

/// Parse an optional zero-based month index from a query parameter.
///
/// Missing and empty values are `Ok(None)`, meaning "the current month".
///
/// # Errors
/// Returns [Error::InvalidParameters] if `raw` is not an integer in `0..=11`.
pub(crate) fn parse_month(raw: Option<&str>) -> Result<Option<Month>, Error> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let index: i64 = raw.parse().map_err(|_| {
        Error::InvalidParameters(format!("month must be an integer, got \"{raw}\""))
    })?;

    month_from_index(index).map(Some)
}

/// Convert a zero-based month index into a [Month].
///
/// # Errors
/// Returns [Error::InvalidParameters] if `index` is outside `0..=11`.
pub(crate) fn month_from_index(index: i64) -> Result<Month, Error> {
    u8::try_from(index)
        .ok()
        .filter(|index| *index <= 11)
        .and_then(|index| Month::try_from(index + 1).ok())
        .ok_or_else(|| {
            Error::InvalidParameters(format!("month must be between 0 and 11, got {index}"))
        })
}

/// Get today's date in `local_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
pub(crate) fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

/// The half-open range `[start of month, start of next month)` for `month` of `year`.
///
/// Month boundaries are midnight in `local_timezone`; the returned instants are in UTC.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known
/// timezone, or [Error::InvalidParameters] if `year` is out of range.
pub(crate) fn month_range(
    year: i32,
    month: Month,
    local_timezone: &str,
) -> Result<Range<OffsetDateTime>, Error> {
    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    };

    let start = local_midnight(first_of_month(year, month)?, local_timezone)?;
    let end = local_midnight(first_of_month(next_year, next_month)?, local_timezone)?;

    Ok(start..end)
}

/// The range for `month` of the current year, or the current month if `month` is `None`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
pub(crate) fn resolve_month_range(
    month: Option<Month>,
    local_timezone: &str,
) -> Result<Range<OffsetDateTime>, Error> {
    let today = current_local_date(local_timezone)?;

    month_range(today.year(), month.unwrap_or(today.month()), local_timezone)
}

fn first_of_month(year: i32, month: Month) -> Result<Date, Error> {
    Date::from_calendar_date(year, month, 1)
        .map_err(|error| Error::InvalidParameters(format!("invalid date: {error}")))
}

fn local_midnight(date: Date, local_timezone: &str) -> Result<OffsetDateTime, Error> {
    let local = PrimitiveDateTime::new(date, Time::MIDNIGHT);
    let offset = get_offset_at(local_timezone, local)
        .ok_or_else(|| Error::InvalidTimezoneError(local_timezone.to_owned()))?;

    Ok(local.assume_offset(offset).to_offset(UtcOffset::UTC))
}
