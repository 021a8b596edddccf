//! Normalize a raw form-submission export into [`Event`] records.
//!
//! The export is `{responses: [{submissionId, submissionTime, questions:
//! [{name, value}]}], totalResponses, pageCount}`. Question names are the form's
//! labels ("Event Name", "Day 1 - Start Time", ...). Sparse answers fall back to
//! defaults; only a missing or unparseable start date and a non-positive day
//! count reject a submission.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;
use serde_json::Value;

use crate::civil::{parse_civil_date, CivilDateTime, ClockTime};
use crate::error::{Result, TimelineError};
use crate::event::{
    validate_total_days, ChatPlatform, DaySlot, Event, EventType, Logo, SCHEDULE_SLOTS,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    #[serde(default)]
    pub responses: Vec<Submission>,
    #[serde(default)]
    pub total_responses: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub submission_id: String,
    #[serde(default)]
    pub submission_time: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Outcome for one submission.
#[derive(Debug)]
pub struct Intake {
    pub submission_id: String,
    pub event: Result<Event>,
}

/// Parse an export and normalize every submission.
///
/// # Errors
/// Returns `TimelineError::Json` if the payload is not an export. Problems with
/// individual submissions are reported per [`Intake`].
pub fn parse_export(json: &str) -> Result<Vec<Intake>> {
    let export: Export = serde_json::from_str(json)?;
    tracing::info!(
        responses = export.responses.len(),
        total_responses = ?export.total_responses,
        "parsed submission export"
    );
    Ok(export
        .responses
        .iter()
        .map(|submission| Intake {
            submission_id: submission.submission_id.clone(),
            event: normalize(submission),
        })
        .collect())
}

/// Turn one submission into an event.
pub fn normalize(submission: &Submission) -> Result<Event> {
    let answers: HashMap<&str, &Value> = submission
        .questions
        .iter()
        .map(|q| (q.name.as_str(), &q.value))
        .collect();
    let text = |name: &str| answers.get(name).and_then(|v| as_text(v));

    let event_name = text("Event Name").unwrap_or_default();
    let raw_start = text("Event Start Date")
        .ok_or_else(|| TimelineError::InvalidDate(format!("'{event_name}' has no start date")))?;
    let start_date = parse_civil_date(&raw_start)?;
    let total_days = match answers.get("Number of Days").and_then(|v| as_number(v)) {
        Some(days) => validate_total_days(&event_name, days)?,
        None => 1,
    };

    let mut event = Event::on_date(event_name, start_date, i64::from(total_days))?;
    event.organizer = text("Organizer Name").unwrap_or_default();
    event.description = text("Event Description").unwrap_or_default();
    event.event_types = answers
        .get("Event Type")
        .map(|v| event_types(v))
        .unwrap_or_else(|| BTreeSet::from([EventType::Other]));
    event.venue = text("Venue Name").unwrap_or_default();
    event.venue_address = text("Venue Address").unwrap_or_default();
    event.venue_link = text("Venue Link");
    event.event_link = text("Event Link/Website");
    event.chat_link = text("Link to Event Group Chat");
    event.chat_platform = text("Event Group Chat Platform").map(|p| ChatPlatform::from_label(&p));
    event.logo = answers.get("Logo").and_then(|v| logos(v));

    for (index, slot) in event.daily_schedule.iter_mut().enumerate().take(SCHEDULE_SLOTS) {
        let day = index + 1;
        *slot = DaySlot::new(
            clock(&event.event_name, text(&format!("Day {day} - Start Time"))),
            clock(&event.event_name, text(&format!("Day {day} - End Time"))),
        );
    }

    event.submission_time = submission
        .submission_time
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| match CivilDateTime::parse(raw) {
            Ok(at) => Some(at),
            Err(err) => {
                tracing::warn!(submission = %submission.submission_id, error = %err, "ignoring submission time");
                None
            }
        });

    Ok(event)
}

/// Non-empty text of a scalar answer.
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn as_number(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        _ => None,
    };
    // A zero count reads as "not given".
    number.filter(|&days| days != 0)
}

fn event_types(value: &Value) -> BTreeSet<EventType> {
    let Value::Array(items) = value else {
        return BTreeSet::from([EventType::Other]);
    };
    let types: BTreeSet<EventType> = items
        .iter()
        .filter_map(Value::as_str)
        .map(EventType::from_label)
        .collect();
    if types.is_empty() {
        BTreeSet::from([EventType::Other])
    } else {
        types
    }
}

fn logos(value: &Value) -> Option<Vec<Logo>> {
    let Value::Array(_) = value else {
        return None;
    };
    serde_json::from_value(value.clone()).ok()
}

fn clock(event_name: &str, raw: Option<String>) -> Option<ClockTime> {
    let raw = raw?;
    match ClockTime::parse(&raw) {
        Ok(time) => Some(time),
        Err(err) => {
            tracing::warn!(event = %event_name, error = %err, "using default time for unparseable value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_days_reads_as_missing() {
        assert_eq!(as_number(&json!(0)), None);
        assert_eq!(as_number(&json!("3")), Some(3));
    }

    #[test]
    fn fractional_days_truncate_alike() {
        assert_eq!(as_number(&json!(2.5)), Some(2));
        assert_eq!(as_number(&json!("2.5")), Some(2));
        assert_eq!(as_number(&json!(" 4.9 ")), Some(4));
        assert_eq!(as_number(&json!("0.5")), None);
        assert_eq!(as_number(&json!("two")), None);
    }

    #[test]
    fn non_list_category_defaults_to_other() {
        assert_eq!(event_types(&json!("Party")), BTreeSet::from([EventType::Other]));
        assert_eq!(
            event_types(&json!(["Party", "Meetup"])),
            BTreeSet::from([EventType::Party, EventType::Meetup])
        );
    }
}
