//! DST transition policies for civil wall-clock times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Policy for wall-clock times that fall inside a DST gap (e.g. 02:30 on the
/// spring-forward date). Ambiguous times in a fall-back overlap always resolve
/// to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Move forward by the length of the gap (02:30 becomes 03:30).
    #[default]
    ShiftForward,
    /// Move back to before the gap (02:30 becomes 01:30).
    ShiftBackward,
}

/// Upper bound on the hours we step across a gap. Real-world gaps are one hour,
/// a few historical ones are two.
const MAX_GAP_HOURS: i64 = 3;

/// Resolve a wall-clock time in `tz` to a concrete instant.
pub(crate) fn resolve_local(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let step = match policy {
                DstPolicy::ShiftForward => Duration::hours(1),
                DstPolicy::ShiftBackward => Duration::hours(-1),
            };
            let mut candidate = local;
            for _ in 0..MAX_GAP_HOURS {
                candidate += step;
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return dt;
                }
            }
            // Not reachable with the tz database; read the wall time as UTC.
            tz.from_utc_datetime(&local)
        }
    }
}
