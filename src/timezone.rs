//! Resolves canonical timezone names to UTC offsets.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset of `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Returns `None` if the timezone name is not known.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get the UTC offset of `canonical_timezone` in effect at the wall-clock time `local`.
///
/// The offset is looked up at `local` read as UTC, which only differs from the
/// true offset within a few hours of a daylight saving transition.
pub(crate) fn get_offset_at(
    canonical_timezone: &str,
    local: PrimitiveDateTime,
) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&local.assume_utc()).to_utc())
}
