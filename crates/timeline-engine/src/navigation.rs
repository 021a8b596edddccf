//! Jump-to-date indexes derived from day segments.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::civil::{anchor_id, CivilDate, CivilDateTime};
use crate::grid::GridConfig;
use crate::splitter::DaySegment;

/// Group segments by date, keys in chronological order.
///
/// Within a date, segments are ordered by start time; equal starts keep
/// their input order.
pub fn group_by_date<'s, 'a>(
    segments: &'s [DaySegment<'a>],
) -> BTreeMap<CivilDate, Vec<&'s DaySegment<'a>>> {
    let mut groups: BTreeMap<CivilDate, Vec<&'s DaySegment<'a>>> = BTreeMap::new();
    for segment in segments {
        groups.entry(segment.current_date).or_default().push(segment);
    }
    for day in groups.values_mut() {
        day.sort_by_key(|segment| segment.start());
    }
    groups
}

/// One entry of the floating day menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAnchor {
    pub date: CivilDate,
    /// Fragment id of the day block, e.g. `date-2025-06-08`.
    pub anchor: String,
    /// Day of month, e.g. `8`.
    pub day: String,
    /// Short weekday, e.g. `Sun`.
    pub weekday: String,
    pub is_today: bool,
}

/// One anchor per grid day, `range_start` through `range_end`.
pub fn day_anchors(config: &GridConfig, today: CivilDate) -> Vec<DayAnchor> {
    let first = CivilDateTime::from_date(config.range_start);
    (0..config.total_days().max(0))
        .map(|offset| {
            let day = first.add_days(offset);
            let date = day.date();
            DayAnchor {
                date,
                anchor: anchor_id(date),
                day: day.day_of_month().to_string(),
                weekday: day.weekday_short(),
                is_today: date == today,
            }
        })
        .collect()
}
