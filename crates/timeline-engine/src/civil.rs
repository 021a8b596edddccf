//! Civil time: every date and time the layout trusts, pinned to one fixed zone.
//!
//! [`CivilDateTime`] never consults the host's local timezone. Construction from
//! a wall-clock string reads it in [`CIVIL_TZ`]; construction from an absolute
//! instant converts into [`CIVIL_TZ`]. Shifting by days keeps the wall-clock
//! time, so `2025-03-29T23:30 + 1 day` is `2025-03-30T23:30` even though only
//! 23 hours elapse across the spring-forward transition.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dst::{resolve_local, DstPolicy};
use crate::error::{Result, TimelineError};

/// The single civil timezone every schedule is displayed in.
pub const CIVIL_TZ: Tz = chrono_tz::Europe::Berlin;

/// A calendar day in the civil zone.
pub type CivilDate = NaiveDate;

/// Parse `YYYY-MM-DD`, or the date part of any form [`CivilDateTime::parse`]
/// accepts.
pub fn parse_civil_date(s: &str) -> Result<CivilDate> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    CivilDateTime::parse(trimmed).map(|dt| dt.date())
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: CivilDate, to: CivilDate) -> i64 {
    (to - from).num_days()
}

/// Anchor id used by jump links for a calendar day, e.g. `date-2025-06-08`.
pub fn anchor_id(date: CivilDate) -> String {
    format!("date-{}", date.format("%Y-%m-%d"))
}

/// An absolute instant viewed through the civil zone.
///
/// Equality and ordering compare instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDateTime(DateTime<Tz>);

impl CivilDateTime {
    /// Parse a date or date-time string.
    ///
    /// - `2025-06-08` is civil midnight.
    /// - `2025-06-08T18:30` or `2025-06-08T18:30:00` is civil wall-clock time.
    /// - `2025-06-08T16:30:00Z` or any RFC 3339 offset is an absolute instant.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidDate` when none of the forms match.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_timestamp(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::from_local(local, DstPolicy::default()));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        Err(TimelineError::InvalidDate(s.to_string()))
    }

    /// Convert an absolute instant into civil time.
    pub fn from_timestamp(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&CIVIL_TZ))
    }

    /// Convert milliseconds since the Unix epoch into civil time.
    pub fn from_timestamp_millis(millis: i64) -> Result<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(Self::from_timestamp)
            .ok_or_else(|| TimelineError::InvalidDate(format!("{millis} ms since epoch")))
    }

    /// Read a wall-clock time in the civil zone.
    pub fn from_local(local: NaiveDateTime, policy: DstPolicy) -> Self {
        Self(resolve_local(&CIVIL_TZ, local, policy))
    }

    /// Civil midnight at the start of `date`.
    pub fn from_date(date: CivilDate) -> Self {
        Self::from_local(date.and_time(NaiveTime::MIN), DstPolicy::default())
    }

    /// Combine a civil date with a time of day.
    pub fn at(date: CivilDate, time: ClockTime) -> Self {
        Self::from_local(date.and_time(time.0), DstPolicy::default())
    }

    pub fn now() -> Self {
        Self::from_timestamp(Utc::now())
    }

    /// Shift the civil date by `n` days, keeping the wall-clock time.
    ///
    /// Month and year rollover is automatic. A date past the end of the
    /// representable calendar saturates at the current value.
    pub fn add_days(&self, n: i64) -> Self {
        let local = self.0.naive_local();
        let shifted = if n >= 0 {
            local.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            local.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        match shifted {
            Some(local) => Self::from_local(local, DstPolicy::default()),
            None => *self,
        }
    }

    pub fn date(&self) -> CivilDate {
        self.0.date_naive()
    }

    pub fn time(&self) -> ClockTime {
        ClockTime::new(self.hour(), self.minute()).unwrap_or(ClockTime::MIDNIGHT)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// `Sun`, `Mon`, ...
    pub fn weekday_short(&self) -> String {
        self.0.format("%a").to_string()
    }

    /// `Sunday`, `Monday`, ...
    pub fn weekday_long(&self) -> String {
        self.0.format("%A").to_string()
    }

    /// `Jan`, `Feb`, ...
    pub fn month_short(&self) -> String {
        self.0.format("%b").to_string()
    }

    /// `January`, `February`, ...
    pub fn month_long(&self) -> String {
        self.0.format("%B").to_string()
    }

    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// `2025-06-08`
    pub fn iso_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Heading form, e.g. `Sunday, June 8`.
    pub fn long_heading(&self) -> String {
        self.0.format("%A, %B %-d").to_string()
    }

    /// Jump-menu form, e.g. `Jun 8, Sun`.
    pub fn short_label(&self) -> String {
        self.0.format("%b %-d, %a").to_string()
    }

    /// Arbitrary `strftime` formatting in the civil zone.
    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl FromStr for CivilDateTime {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CivilDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A wall-clock time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// `00:00`, the first minute of a day.
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    /// Build from hour and minute. Returns `None` outside `00:00..=23:59`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// `23:59`, the last displayable minute of a day.
    pub fn end_of_day() -> Self {
        Self::new(23, 59).unwrap_or(Self::MIDNIGHT)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Parse `HH:MM`, also tolerating `H:MM` and `HH:MM:SS` (seconds dropped).
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidTime` on anything else.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(|t| Self(t.with_second(0).unwrap_or(t)))
            .map_err(|_| TimelineError::InvalidTime(trimmed.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
