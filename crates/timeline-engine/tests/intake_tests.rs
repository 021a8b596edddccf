//! Tests for normalizing raw form-submission exports.

use std::collections::BTreeSet;

use serde_json::json;
use timeline_engine::event::{sort_by_submission_time, ChatPlatform};
use timeline_engine::intake::parse_export;
use timeline_engine::{ClockTime, Event, EventType, TimelineError};

fn submission(id: &str, time: Option<&str>, questions: serde_json::Value) -> serde_json::Value {
    json!({
        "submissionId": id,
        "submissionTime": time,
        "questions": questions,
    })
}

fn export(responses: Vec<serde_json::Value>) -> String {
    let total = responses.len();
    json!({
        "responses": responses,
        "totalResponses": total,
        "pageCount": 1,
    })
    .to_string()
}

fn single(questions: serde_json::Value) -> Result<Event, TimelineError> {
    let raw = export(vec![submission("s1", Some("2025-05-01T10:00:00.000Z"), questions)]);
    parse_export(&raw).unwrap().remove(0).event
}

#[test]
fn full_submission_maps_every_field() {
    let event = single(json!([
        {"id": "q1", "name": "Event Name", "type": "ShortAnswer", "value": "ETH Berlin Kickoff"},
        {"id": "q2", "name": "Event Start Date", "type": "DatePicker", "value": "2025-06-12"},
        {"id": "q3", "name": "Number of Days", "type": "NumberInput", "value": 2},
        {"id": "q4", "name": "Organizer Name", "type": "ShortAnswer", "value": "Builders"},
        {"id": "q5", "name": "Event Description", "type": "LongAnswer", "value": "Talks and drinks"},
        {"id": "q6", "name": "Event Type", "type": "MultipleChoice", "value": ["Conference", "Happy Hour"]},
        {"id": "q7", "name": "Venue Name", "type": "ShortAnswer", "value": "Factory"},
        {"id": "q8", "name": "Venue Address", "type": "ShortAnswer", "value": "Lohmühlenstraße 65"},
        {"id": "q9", "name": "Venue Link", "type": "URLInput", "value": "https://maps.example/factory"},
        {"id": "q10", "name": "Event Link/Website", "type": "URLInput", "value": "https://kickoff.example"},
        {"id": "q11", "name": "Link to Event Group Chat", "type": "URLInput", "value": "https://t.me/kickoff"},
        {"id": "q12", "name": "Event Group Chat Platform", "type": "Dropdown", "value": "Telegram"},
        {"id": "q13", "name": "Logo", "type": "FileUpload", "value": [{"url": "https://cdn.example/logo.png", "filename": "logo.png"}]},
        {"id": "q14", "name": "Day 1 - Start Time", "type": "TimePicker", "value": "18:00"},
        {"id": "q15", "name": "Day 1 - End Time", "type": "TimePicker", "value": "02:00"},
        {"id": "q16", "name": "Day 2 - Start Time", "type": "TimePicker", "value": "10:00"}
    ]))
    .unwrap();

    assert_eq!(event.event_name, "ETH Berlin Kickoff");
    assert_eq!(event.start_date.to_string(), "2025-06-12");
    assert_eq!(event.total_days, 2);
    assert_eq!(event.organizer, "Builders");
    assert_eq!(
        event.event_types,
        BTreeSet::from([EventType::Conference, EventType::HappyHour])
    );
    assert_eq!(event.venue_link.as_deref(), Some("https://maps.example/factory"));
    assert_eq!(event.chat_platform, Some(ChatPlatform::Telegram));
    assert_eq!(event.display_logo().unwrap().filename, "logo.png");
    assert_eq!(event.daily_schedule[0].start_time, ClockTime::new(18, 0));
    assert_eq!(event.daily_schedule[0].end_time, ClockTime::new(2, 0));
    assert_eq!(event.daily_schedule[1].start_time, ClockTime::new(10, 0));
    assert_eq!(event.daily_schedule[1].end_time, None);
    assert_eq!(event.submission_time.unwrap().iso_date(), "2025-05-01");
}

#[test]
fn sparse_submission_falls_back_to_defaults() {
    let event = single(json!([
        {"name": "Event Name", "value": "Pop-up"},
        {"name": "Event Start Date", "value": "2025-06-15"},
        {"name": "Event Type", "value": "Party"},
        {"name": "Venue Link", "value": ""},
        {"name": "Logo", "value": null},
        {"name": "Day 1 - Start Time", "value": "around noon"}
    ]))
    .unwrap();

    assert_eq!(event.total_days, 1);
    assert_eq!(event.event_types, BTreeSet::from([EventType::Other]));
    assert_eq!(event.venue_link, None);
    assert_eq!(event.logo, None);
    assert_eq!(event.chat_platform, None);
    assert_eq!(event.daily_schedule[0].start_time, None);
}

#[test]
fn unknown_categories_and_platforms_map_to_other() {
    let event = single(json!([
        {"name": "Event Start Date", "value": "2025-06-15"},
        {"name": "Event Type", "value": ["Workshop", "Meetup"]},
        {"name": "Event Group Chat Platform", "value": "WhatsApp"}
    ]))
    .unwrap();

    assert_eq!(
        event.event_types,
        BTreeSet::from([EventType::Other, EventType::Meetup])
    );
    assert_eq!(event.chat_platform, Some(ChatPlatform::Other));
}

#[test]
fn day_count_as_text_is_accepted() {
    let event = single(json!([
        {"name": "Event Start Date", "value": "2025-06-15"},
        {"name": "Number of Days", "value": "3"}
    ]))
    .unwrap();

    assert_eq!(event.total_days, 3);
}

#[test]
fn missing_start_date_is_rejected() {
    let err = single(json!([{"name": "Event Name", "value": "Floating"}])).unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate(_)));
}

#[test]
fn unparseable_start_date_is_rejected() {
    let err = single(json!([
        {"name": "Event Name", "value": "Someday"},
        {"name": "Event Start Date", "value": "mid June"}
    ]))
    .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate(_)));
}

#[test]
fn negative_day_count_is_rejected() {
    let err = single(json!([
        {"name": "Event Start Date", "value": "2025-06-15"},
        {"name": "Number of Days", "value": -2}
    ]))
    .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidTotalDays { total_days: -2, .. }));
}

#[test]
fn one_bad_submission_does_not_sink_the_rest() {
    let raw = export(vec![
        submission("bad", None, json!([{"name": "Event Name", "value": "No Date"}])),
        submission(
            "good",
            None,
            json!([{"name": "Event Start Date", "value": "2025-06-15"}]),
        ),
    ]);

    let intakes = parse_export(&raw).unwrap();

    assert_eq!(intakes.len(), 2);
    assert!(intakes[0].event.is_err());
    assert_eq!(intakes[1].submission_id, "good");
    assert!(intakes[1].event.is_ok());
}

#[test]
fn malformed_export_is_a_json_error() {
    let err = parse_export("{\"responses\": 7}").unwrap_err();
    assert!(matches!(err, TimelineError::Json(_)));
}

#[test]
fn submissions_sort_oldest_first_with_undated_last() {
    let raw = export(vec![
        submission("undated", None, json!([{"name": "Event Start Date", "value": "2025-06-15"}])),
        submission(
            "newer",
            Some("2025-05-03T09:00:00Z"),
            json!([{"name": "Event Start Date", "value": "2025-06-15"}]),
        ),
        submission(
            "older",
            Some("2025-05-01T09:00:00Z"),
            json!([{"name": "Event Start Date", "value": "2025-06-15"}]),
        ),
    ]);
    let mut events: Vec<Event> = parse_export(&raw)
        .unwrap()
        .into_iter()
        .map(|intake| {
            let mut event = intake.event.unwrap();
            event.event_name = intake.submission_id;
            event
        })
        .collect();

    sort_by_submission_time(&mut events);

    let names: Vec<&str> = events.iter().map(|e| e.event_name.as_str()).collect();
    assert_eq!(names, ["older", "newer", "undated"]);
}
