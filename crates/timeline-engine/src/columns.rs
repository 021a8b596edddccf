//! Side-by-side column assignment for overlapping day segments.
//!
//! Greedy first-fit over a fixed processing order: segments sorted by
//! `current_date` ascending, ties kept in input order. Each segment takes the
//! smallest column not held by an already-assigned segment it overlaps. The
//! result is collision-free but not guaranteed minimal, and it depends on that
//! processing order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::civil::CivilDateTime;
use crate::splitter::DaySegment;

/// Two segments overlap when they share a date and their half-open windows
/// intersect. Touching windows (`a.end == b.start`) do not overlap.
pub fn segments_overlap(a: &DaySegment<'_>, b: &DaySegment<'_>) -> bool {
    if a.current_date != b.current_date {
        return false;
    }
    a.start() < b.end() && a.end() > b.start()
}

/// Column per segment, indexed like the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    columns: Vec<usize>,
    order: Vec<usize>,
}

impl ColumnAssignment {
    /// Column of the segment at input position `index`.
    pub fn column(&self, index: usize) -> Option<usize> {
        self.columns.get(index).copied()
    }

    /// Columns in input order.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Input positions in the order they were assigned.
    pub fn processing_order(&self) -> &[usize] {
        &self.order
    }

    /// Highest column in use, `0` when nothing was assigned.
    pub fn max_column(&self) -> usize {
        self.columns.iter().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The fixed order in which segments are assigned: by date, then input order.
pub fn processing_order(segments: &[DaySegment<'_>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    // Stable sort keeps input order within a date.
    order.sort_by_key(|&i| segments[i].current_date);
    order
}

/// Assign a column to every segment.
///
/// Segments are not modified; the returned mapping is indexed by input position.
pub fn assign_columns(segments: &[DaySegment<'_>]) -> ColumnAssignment {
    let order = processing_order(segments);
    // Windows are resolved once; the scan below is quadratic.
    let windows: Vec<(CivilDateTime, CivilDateTime)> =
        segments.iter().map(|s| (s.start(), s.end())).collect();
    let mut assigned: Vec<Option<usize>> = vec![None; segments.len()];

    for &current in &order {
        let segment = &segments[current];
        let (start, end) = windows[current];
        let used: BTreeSet<usize> = segments
            .iter()
            .enumerate()
            .filter(|&(other, candidate)| {
                other != current
                    && candidate.current_date == segment.current_date
                    && start < windows[other].1
                    && end > windows[other].0
            })
            .filter_map(|(other, _)| assigned[other])
            .collect();

        let mut column = 0;
        while used.contains(&column) {
            column += 1;
        }
        assigned[current] = Some(column);
    }

    let columns: Vec<usize> = assigned.into_iter().map(|c| c.unwrap_or(0)).collect();
    let assignment = ColumnAssignment { columns, order };
    tracing::debug!(
        segments = assignment.len(),
        max_column = assignment.max_column(),
        "assigned columns"
    );
    assignment
}
