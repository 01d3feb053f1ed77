//! Day boundaries for the scan history query.

use chrono::{FixedOffset, NaiveDate};
use timbro_types::Timestamp;

pub(crate) const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Convert a calendar date to the `[start, end)` millisecond window of that
/// local day, using the caller's timezone offset.
///
/// Returns `None` for dates that fall before the Unix epoch once the offset
/// is applied.
pub fn day_bounds(date: NaiveDate, offset: FixedOffset) -> Option<(Timestamp, Timestamp)> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    // A fixed offset maps every local time to exactly one instant.
    let start = midnight.and_local_timezone(offset).single()?;
    let start_ms = start.timestamp_millis();
    if start_ms < 0 {
        return None;
    }
    let start_ms = start_ms as u64;
    Some((Timestamp::new(start_ms), Timestamp::new(start_ms + DAY_MS)))
}

/// Whether a scan timestamp falls within the window.
pub(crate) fn in_window(at: Timestamp, start: Timestamp, end: Timestamp) -> bool {
    at >= start && at < end
}
