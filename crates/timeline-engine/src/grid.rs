//! Map day segments onto the discrete time-chunk grid.
//!
//! The grid stacks one block per day from `range_start` to `range_end`. Each
//! block covers `hours_per_day` hours starting at `day_start_hour`, divided into
//! `chunk_minutes` chunks of `chunk_height` units.

use serde::{Deserialize, Serialize};

use crate::civil::{days_between, CivilDate, CivilDateTime};
use crate::error::{Result, TimelineError};
use crate::splitter::DaySegment;

/// Layout parameters for the grid and column width math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub range_start: CivilDate,
    pub range_end: CivilDate,
    pub day_start_hour: u32,
    pub hours_per_day: u32,
    pub chunk_minutes: u32,
    pub chunk_height: u32,
    pub column_width: u32,
    pub column_gap: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            range_start: CivilDate::from_ymd_opt(2025, 6, 7).unwrap_or_default(),
            range_end: CivilDate::from_ymd_opt(2025, 6, 22).unwrap_or_default(),
            day_start_hour: 6,
            hours_per_day: 18,
            chunk_minutes: 15,
            chunk_height: 10,
            column_width: 100,
            column_gap: 8,
        }
    }
}

impl GridConfig {
    /// Narrow-viewport column metrics.
    pub fn compact() -> Self {
        Self::default().with_compact_columns()
    }

    pub fn with_compact_columns(mut self) -> Self {
        self.column_width = 50;
        self.column_gap = 4;
        self
    }

    /// # Errors
    /// Returns `TimelineError::InvalidConfig` if the parameters cannot form a grid.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_minutes == 0 {
            return Err(TimelineError::InvalidConfig(
                "chunk_minutes must be positive".to_string(),
            ));
        }
        if self.day_start_hour > 23 {
            return Err(TimelineError::InvalidConfig(format!(
                "day_start_hour {} is not an hour of the day",
                self.day_start_hour
            )));
        }
        let window_end = self.day_start_hour.checked_add(self.hours_per_day);
        if self.hours_per_day == 0 || !matches!(window_end, Some(end) if end <= 24) {
            return Err(TimelineError::InvalidConfig(format!(
                "visible window {}:00 + {}h must lie within one day",
                self.day_start_hour, self.hours_per_day
            )));
        }
        if (self.hours_per_day * 60) % self.chunk_minutes != 0 {
            return Err(TimelineError::InvalidConfig(format!(
                "{} visible hours do not divide into {}-minute chunks",
                self.hours_per_day, self.chunk_minutes
            )));
        }
        if self.range_end < self.range_start {
            return Err(TimelineError::InvalidConfig(format!(
                "range end {} is before range start {}",
                self.range_end, self.range_start
            )));
        }
        Ok(())
    }

    pub fn chunks_per_day(&self) -> i64 {
        i64::from(self.hours_per_day) * 60 / i64::from(self.chunk_minutes.max(1))
    }

    /// Number of day blocks in the grid, both ends inclusive.
    pub fn total_days(&self) -> i64 {
        days_between(self.range_start, self.range_end) + 1
    }

    /// Height of one day block.
    pub fn day_height(&self) -> i64 {
        self.chunks_per_day() * i64::from(self.chunk_height)
    }

    /// Height of the whole grid.
    pub fn grid_height(&self) -> i64 {
        self.total_days() * self.day_height()
    }

    pub fn contains(&self, date: CivilDate) -> bool {
        self.range_start <= date && date <= self.range_end
    }

    /// Horizontal distance between the left edges of adjacent columns.
    fn column_pitch(&self) -> i64 {
        i64::from(self.column_width) + i64::from(self.column_gap)
    }

    /// Horizontal offset of a column.
    pub fn column_left(&self, column: usize) -> i64 {
        column as i64 * self.column_pitch()
    }

    /// Width needed for columns `0..=max_column`, plus one spare column.
    pub fn total_width(&self, max_column: usize) -> i64 {
        (max_column as i64 + 2) * self.column_pitch()
    }

    /// Top of the chunk holding `minutes` past `day_start_hour` on `date`.
    fn chunk_top(&self, date: CivilDate, minutes: i64) -> i64 {
        let days = days_between(self.range_start, date);
        let chunk = minutes.div_euclid(i64::from(self.chunk_minutes.max(1)));
        (days * self.chunks_per_day() + chunk) * i64::from(self.chunk_height)
    }
}

/// Vertical placement of a segment, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub top: i64,
    pub height: i64,
}

/// Place a segment on the grid.
///
/// Returns `None` when the segment is not shown: its date lies outside the
/// range, or it starts before `day_start_hour` without being an overnight
/// continuation, or an overnight continuation ends before the grid opens.
/// Overnight continuations that reach into the grid are clipped to its top.
pub fn segment_position(segment: &DaySegment<'_>, config: &GridConfig) -> Option<GridPosition> {
    if !config.contains(segment.current_date) {
        return None;
    }
    let day_start = i64::from(config.day_start_hour);
    let starts_early = i64::from(segment.start_time.hour()) < day_start;
    if starts_early && !segment.is_overnight_event {
        return None;
    }

    let mut start_minutes =
        (i64::from(segment.start_time.hour()) - day_start) * 60 + i64::from(segment.start_time.minute());
    let end_hour = if segment.wraps_midnight() {
        i64::from(segment.end_time.hour()) + 24
    } else {
        i64::from(segment.end_time.hour())
    };
    let end_minutes = (end_hour - day_start) * 60 + i64::from(segment.end_time.minute());

    if starts_early {
        if end_minutes <= 0 {
            return None;
        }
        start_minutes = 0;
    }

    let chunk = i64::from(config.chunk_minutes.max(1));
    let top = config.chunk_top(segment.current_date, start_minutes);
    let height = (end_minutes - start_minutes).div_euclid(chunk).max(0) * i64::from(config.chunk_height);
    Some(GridPosition { top, height })
}

/// Row of the live "now" indicator.
///
/// The minute is rounded to the nearest chunk. Returns `None` when `now` falls
/// outside the date range or before `day_start_hour`.
pub fn now_position(now: &CivilDateTime, config: &GridConfig) -> Option<i64> {
    let date = now.date();
    if !config.contains(date) || now.hour() < config.day_start_hour {
        return None;
    }
    let chunk = i64::from(config.chunk_minutes.max(1));
    let rounded_minute = ((i64::from(now.minute()) * 2 + chunk) / (chunk * 2)) * chunk;
    let minutes = (i64::from(now.hour()) - i64::from(config.day_start_hour)) * 60 + rounded_minute;
    Some(config.chunk_top(date, minutes))
}
