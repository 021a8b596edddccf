//! Split multi-day events into one segment per calendar day.
//!
//! A segment's window comes from the event's `daily_schedule` slot for that
//! day, defaulting to 06:00-23:59. A window whose end hour is below its start
//! hour is read as crossing midnight:
//!
//! - day 0 ends at 23:59,
//! - day 1 starts at 00:00 (the carried-over portion),
//! - later days end at 23:59, keeping every segment inside its own date.

use crate::civil::{CivilDate, CivilDateTime, ClockTime};
use crate::error::Result;
use crate::event::{validate_total_days, DaySlot, Event};

/// Start of a day's window when the schedule leaves it out.
pub fn default_start_time() -> ClockTime {
    ClockTime::new(6, 0).unwrap_or(ClockTime::MIDNIGHT)
}

/// End of a day's window when the schedule leaves it out.
pub fn default_end_time() -> ClockTime {
    ClockTime::end_of_day()
}

/// Coarse overnight test: the end hour is numerically below the start hour.
///
/// `09:00-09:30` is never overnight, `22:00-01:00` is.
pub fn is_overnight(start: ClockTime, end: ClockTime) -> bool {
    end.hour() < start.hour()
}

/// One calendar day of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySegment<'a> {
    pub event: &'a Event,
    /// 1-based day number within the event.
    pub day_index: u32,
    pub total_days: u32,
    pub current_date: CivilDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// The stated window for this day crosses midnight. Set from the window
    /// as written, before day-boundary clamping.
    pub is_overnight_event: bool,
}

impl<'a> DaySegment<'a> {
    /// Absolute start of the segment in civil time.
    pub fn start(&self) -> CivilDateTime {
        CivilDateTime::at(self.current_date, self.start_time)
    }

    /// Absolute end of the segment in civil time.
    pub fn end(&self) -> CivilDateTime {
        CivilDateTime::at(self.current_date, self.end_time)
    }

    /// The clamped window still wraps past midnight.
    pub fn wraps_midnight(&self) -> bool {
        is_overnight(self.start_time, self.end_time)
    }

    /// `Name (Day 2/3)` for multi-day events, `Name` otherwise.
    pub fn title(&self) -> String {
        if self.total_days > 1 {
            format!(
                "{} (Day {}/{})",
                self.event.event_name, self.day_index, self.total_days
            )
        } else {
            self.event.event_name.clone()
        }
    }
}

/// Split one event into `total_days` segments, in date order.
///
/// # Errors
/// Returns `TimelineError::InvalidTotalDays` if the event has no days.
pub fn split_event(event: &Event) -> Result<Vec<DaySegment<'_>>> {
    let total_days = validate_total_days(&event.event_name, i64::from(event.total_days))?;
    let first_day = CivilDateTime::from_date(event.start_date);

    let segments = (0..total_days)
        .map(|offset| {
            let index = offset as usize;
            let current_date = first_day.add_days(i64::from(offset)).date();
            let slot = stated_slot(event, index);
            let mut start_time = slot.start_time.unwrap_or_else(default_start_time);
            let mut end_time = slot.end_time.unwrap_or_else(default_end_time);

            let is_overnight_event = is_overnight(start_time, end_time);
            if is_overnight_event {
                if index == 1 {
                    start_time = ClockTime::MIDNIGHT;
                } else {
                    end_time = ClockTime::end_of_day();
                }
            }

            DaySegment {
                event,
                day_index: offset + 1,
                total_days,
                current_date,
                start_time,
                end_time,
                is_overnight_event,
            }
        })
        .collect();

    Ok(segments)
}

/// The window stated for day `index`. An empty second-day slot after an
/// overnight first day carries the first day's window, so the part past
/// midnight still lands on day 2.
fn stated_slot(event: &Event, index: usize) -> DaySlot {
    let slot = event.slot(index);
    if index == 1 && slot == DaySlot::default() {
        let first = event.slot(0);
        if let (Some(start), Some(end)) = (first.start_time, first.end_time) {
            if is_overnight(start, end) {
                return first;
            }
        }
    }
    slot
}

/// Split every event, concatenating the segments in input order.
pub fn split_events(events: &[Event]) -> Result<Vec<DaySegment<'_>>> {
    let mut segments = Vec::new();
    for event in events {
        segments.extend(split_event(event)?);
    }
    tracing::debug!(
        events = events.len(),
        segments = segments.len(),
        "split events into day segments"
    );
    Ok(segments)
}
