//! Normalized event records, the input to the layout pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::civil::{parse_civil_date, CivilDate, CivilDateTime, ClockTime};
use crate::error::{Result, TimelineError};

/// Number of per-day windows an event carries. Days past the last slot use
/// the default window.
pub const SCHEDULE_SLOTS: usize = 7;

/// Event category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    Conference,
    Hackathon,
    Meetup,
    Party,
    Coworking,
    #[serde(rename = "Happy Hour")]
    HappyHour,
    Other,
}

impl EventType {
    /// Map a form label onto a category. Unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Conference" => Self::Conference,
            "Hackathon" => Self::Hackathon,
            "Meetup" => Self::Meetup,
            "Party" => Self::Party,
            "Coworking" => Self::Coworking,
            "Happy Hour" => Self::HappyHour,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatPlatform {
    Matrix,
    Telegram,
    Discord,
    Signal,
    Other,
}

impl ChatPlatform {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Matrix" => Self::Matrix,
            "Telegram" => Self::Telegram,
            "Discord" => Self::Discord,
            "Signal" => Self::Signal,
            _ => Self::Other,
        }
    }
}

/// An uploaded logo file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    pub filename: String,
}

/// The stated time window for one day of an event. Either side may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaySlot {
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl DaySlot {
    pub fn new(start_time: Option<ClockTime>, end_time: Option<ClockTime>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// A normalized event.
///
/// `daily_schedule[i]` is the window for the day `i` days after `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_name: String,
    pub organizer: String,
    pub description: String,
    pub start_date: CivilDate,
    pub total_days: u32,
    pub event_types: BTreeSet<EventType>,
    pub venue: String,
    pub venue_address: String,
    pub venue_link: Option<String>,
    pub event_link: Option<String>,
    pub chat_link: Option<String>,
    pub chat_platform: Option<ChatPlatform>,
    pub logo: Option<Vec<Logo>>,
    pub daily_schedule: [DaySlot; SCHEDULE_SLOTS],
    pub submission_time: Option<CivilDateTime>,
}

impl Event {
    /// Create an event with every optional attribute empty, categorized `Other`.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidDate` if `start_date` does not parse and
    /// `TimelineError::InvalidTotalDays` if `total_days < 1`.
    pub fn new(event_name: impl Into<String>, start_date: &str, total_days: i64) -> Result<Self> {
        Self::on_date(event_name, parse_civil_date(start_date)?, total_days)
    }

    /// Like [`Event::new`], for an already parsed start date.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidTotalDays` if `total_days < 1`.
    pub fn on_date(
        event_name: impl Into<String>,
        start_date: CivilDate,
        total_days: i64,
    ) -> Result<Self> {
        let event_name = event_name.into();
        let total_days = validate_total_days(&event_name, total_days)?;
        Ok(Self {
            event_name,
            organizer: String::new(),
            description: String::new(),
            start_date,
            total_days,
            event_types: BTreeSet::from([EventType::Other]),
            venue: String::new(),
            venue_address: String::new(),
            venue_link: None,
            event_link: None,
            chat_link: None,
            chat_platform: None,
            logo: None,
            daily_schedule: [DaySlot::default(); SCHEDULE_SLOTS],
            submission_time: None,
        })
    }

    /// Set the window for day `index` (0-based). Indices past the schedule are ignored.
    pub fn with_day(mut self, index: usize, start: &str, end: &str) -> Result<Self> {
        if let Some(slot) = self.daily_schedule.get_mut(index) {
            *slot = DaySlot::new(Some(ClockTime::parse(start)?), Some(ClockTime::parse(end)?));
        }
        Ok(self)
    }

    /// The stated window for day `index`, if the schedule has a slot for it.
    pub fn slot(&self, index: usize) -> DaySlot {
        self.daily_schedule.get(index).copied().unwrap_or_default()
    }

    /// The logo shown in compact views.
    pub fn display_logo(&self) -> Option<&Logo> {
        self.logo.as_ref().and_then(|logos| logos.first())
    }

    /// The last calendar day the event occupies.
    pub fn end_date(&self) -> CivilDate {
        let last = CivilDateTime::from_date(self.start_date).add_days(i64::from(self.total_days) - 1);
        last.date()
    }
}

pub(crate) fn validate_total_days(event_name: &str, total_days: i64) -> Result<u32> {
    match u32::try_from(total_days) {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(TimelineError::InvalidTotalDays {
            event: event_name.to_string(),
            total_days,
        }),
    }
}

/// Order events oldest submission first. Events without a submission time go
/// last; ties keep their input order.
pub fn sort_by_submission_time(events: &mut [Event]) {
    events.sort_by(|a, b| match (&a.submission_time, &b.submission_time) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
