//! # timeline-engine
//!
//! Deterministic, collision-free layout of multi-day events on a fixed
//! time-chunk grid.
//!
//! All date arithmetic happens in one civil timezone (`Europe/Berlin`), so every
//! viewer sees the same wall-clock schedule regardless of the host's local zone.
//! Events are split into per-day segments, overlapping segments on the same day
//! get side-by-side columns, and each segment maps to a `(top, height)` pair on
//! the grid.
//!
//! ## Modules
//!
//! - [`civil`]: Fixed-zone date/time value, `HH:MM` clock times, formatting
//! - [`dst`]: Resolution of wall-clock times inside DST gaps and overlaps
//! - [`event`]: Normalized event records
//! - [`intake`]: Raw form-submission export → events
//! - [`splitter`]: Event → one segment per calendar day
//! - [`columns`]: Overlap detection and greedy column assignment
//! - [`grid`]: Grid configuration, segment placement, "now" indicator
//! - [`navigation`]: Date grouping and jump anchors
//! - [`timeline`]: The full layout pass
//! - [`error`]: Error types

pub mod civil;
pub mod columns;
pub mod dst;
pub mod error;
pub mod event;
pub mod grid;
pub mod intake;
pub mod navigation;
pub mod splitter;
pub mod timeline;

pub use civil::{CivilDate, CivilDateTime, ClockTime, CIVIL_TZ};
pub use columns::{assign_columns, segments_overlap, ColumnAssignment};
pub use error::TimelineError;
pub use event::{Event, EventType};
pub use grid::{now_position, segment_position, GridConfig, GridPosition};
pub use navigation::{day_anchors, group_by_date, DayAnchor};
pub use splitter::{split_event, split_events, DaySegment};
pub use timeline::{layout, Timeline, TimelineEntry};
