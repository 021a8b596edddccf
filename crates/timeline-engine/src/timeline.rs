//! The full layout pass: split, assign columns, place on the grid.

use serde::Serialize;

use crate::civil::{CivilDate, ClockTime};
use crate::columns::{assign_columns, ColumnAssignment};
use crate::error::Result;
use crate::event::Event;
use crate::grid::{segment_position, GridConfig, GridPosition};
use crate::splitter::{split_events, DaySegment};

/// A segment with its column and, when shown, its grid placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSegment<'a> {
    pub segment: DaySegment<'a>,
    pub column: usize,
    pub position: Option<GridPosition>,
}

impl PlacedSegment<'_> {
    pub fn is_shown(&self) -> bool {
        self.position.is_some()
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    /// Segments in column-assignment order (date, then input order).
    pub segments: Vec<PlacedSegment<'a>>,
    pub max_column: usize,
    pub total_width: i64,
    /// Number of day blocks in the grid.
    pub total_days: i64,
}

impl<'a> Timeline<'a> {
    pub fn shown(&self) -> impl Iterator<Item = &PlacedSegment<'a>> {
        self.segments.iter().filter(|placed| placed.is_shown())
    }

    pub fn entries(&self, config: &GridConfig) -> Vec<TimelineEntry> {
        self.segments
            .iter()
            .map(|placed| TimelineEntry::new(placed, config))
            .collect()
    }
}

/// Lay out `events` on the grid described by `config`.
///
/// Every pass recomputes from scratch; nothing is kept between calls.
///
/// # Errors
/// Returns `TimelineError::InvalidConfig` for an unusable grid and
/// `TimelineError::InvalidTotalDays` for an event with no days.
pub fn layout<'a>(events: &'a [Event], config: &GridConfig) -> Result<Timeline<'a>> {
    config.validate()?;
    let segments = split_events(events)?;
    let assignment = assign_columns(&segments);
    Ok(place(&segments, &assignment, config))
}

/// Combine split segments with their columns and grid positions.
pub fn place<'a>(
    segments: &[DaySegment<'a>],
    assignment: &ColumnAssignment,
    config: &GridConfig,
) -> Timeline<'a> {
    let placed: Vec<PlacedSegment<'a>> = assignment
        .processing_order()
        .iter()
        .map(|&index| PlacedSegment {
            segment: segments[index],
            column: assignment.column(index).unwrap_or(0),
            position: segment_position(&segments[index], config),
        })
        .collect();

    let hidden = placed.iter().filter(|p| !p.is_shown()).count();
    if hidden > 0 {
        tracing::debug!(hidden, "segments excluded from the grid");
    }

    let max_column = assignment.max_column();
    Timeline {
        segments: placed,
        max_column,
        total_width: config.total_width(max_column),
        total_days: config.total_days(),
    }
}

/// Owned, serializable view of a placed segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub event_name: String,
    pub title: String,
    pub day_index: u32,
    pub total_days: u32,
    pub date: CivilDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub is_overnight_event: bool,
    pub column: usize,
    pub left: i64,
    pub position: Option<GridPosition>,
}

impl TimelineEntry {
    pub fn new(placed: &PlacedSegment<'_>, config: &GridConfig) -> Self {
        let segment = &placed.segment;
        Self {
            event_name: segment.event.event_name.clone(),
            title: segment.title(),
            day_index: segment.day_index,
            total_days: segment.total_days,
            date: segment.current_date,
            start_time: segment.start_time,
            end_time: segment.end_time,
            is_overnight_event: segment.is_overnight_event,
            column: placed.column,
            left: config.column_left(placed.column),
            position: placed.position,
        }
    }
}
