//! Resolves the configured canonical timezone to a UTC offset.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for `canonical_timezone`, e.g. "Asia/Tokyo".
///
/// Returns `None` if the timezone name is not a known canonical timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get the current wall-clock time in `canonical_timezone`.
///
/// Returns `None` if the timezone name is not a known canonical timezone.
pub fn local_now(canonical_timezone: &str) -> Option<OffsetDateTime> {
    get_local_offset(canonical_timezone).map(|offset| OffsetDateTime::now_utc().to_offset(offset))
}
