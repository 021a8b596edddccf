//! Tests for the fixed-zone civil time value.

use chrono::{TimeZone, Utc};
use timeline_engine::civil::{anchor_id, days_between, parse_civil_date};
use timeline_engine::dst::DstPolicy;
use timeline_engine::{CivilDateTime, ClockTime, TimelineError};

fn civil(s: &str) -> CivilDateTime {
    CivilDateTime::parse(s).unwrap()
}

#[test]
fn add_day_keeps_wall_clock_time() {
    let next = civil("2025-06-08T23:30").add_days(1);

    assert_eq!(next.iso_date(), "2025-06-09");
    assert_eq!((next.hour(), next.minute()), (23, 30));
}

#[test]
fn add_day_across_spring_forward_is_23_hours() {
    // Berlin moves from +01:00 to +02:00 on 2025-03-30.
    let before = civil("2025-03-29T23:30");
    let after = before.add_days(1);

    assert_eq!(after.iso_date(), "2025-03-30");
    assert_eq!((after.hour(), after.minute()), (23, 30));
    assert_eq!((after.instant() - before.instant()).num_hours(), 23);
}

#[test]
fn add_day_across_fall_back_is_25_hours() {
    let before = civil("2025-10-25T12:00");
    let after = before.add_days(1);

    assert_eq!(after.iso_date(), "2025-10-26");
    assert_eq!(after.hour(), 12);
    assert_eq!((after.instant() - before.instant()).num_hours(), 25);
}

#[test]
fn add_days_rolls_over_month_and_year() {
    assert_eq!(civil("2025-06-30T10:00").add_days(1).iso_date(), "2025-07-01");
    assert_eq!(civil("2025-01-01T10:00").add_days(-1).iso_date(), "2024-12-31");
    assert_eq!(civil("2024-02-28").add_days(1).iso_date(), "2024-02-29");
}

#[test]
fn absolute_instant_converts_into_civil_zone() {
    // 22:30 UTC in June is 00:30 the next day in Berlin.
    let late = civil("2025-06-08T22:30:00Z");

    assert_eq!(late.iso_date(), "2025-06-09");
    assert_eq!((late.hour(), late.minute()), (0, 30));
}

#[test]
fn wall_clock_and_instant_forms_compare_equal() {
    assert_eq!(civil("2025-06-08T18:30"), civil("2025-06-08T16:30:00Z"));
    assert_eq!(civil("2025-06-08T18:30:00"), civil("2025-06-08T18:30:00+02:00"));
}

#[test]
fn comparison_is_by_instant() {
    assert!(civil("2025-06-08T09:00") < civil("2025-06-08T09:01"));
    assert!(civil("2025-06-09") > civil("2025-06-08T23:59"));
}

#[test]
fn from_timestamp_uses_civil_offset() {
    let epoch = CivilDateTime::from_timestamp_millis(0).unwrap();
    assert_eq!(epoch.iso_date(), "1970-01-01");
    assert_eq!(epoch.hour(), 1);

    let summer = CivilDateTime::from_timestamp(Utc.with_ymd_and_hms(2025, 6, 8, 12, 0, 0).unwrap());
    assert_eq!(summer.hour(), 14);
}

#[test]
fn date_only_is_civil_midnight() {
    let midnight = civil("2025-06-08");
    assert_eq!((midnight.hour(), midnight.minute()), (0, 0));
    assert_eq!(midnight.time(), ClockTime::MIDNIGHT);
}

#[test]
fn gap_time_is_shifted_by_policy() {
    let local = parse_civil_date("2025-03-30")
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();

    let forward = CivilDateTime::from_local(local, DstPolicy::ShiftForward);
    let backward = CivilDateTime::from_local(local, DstPolicy::ShiftBackward);

    assert_eq!(forward.hour(), 3);
    assert_eq!(backward.hour(), 1);
}

#[test]
fn unparseable_date_is_rejected() {
    let err = CivilDateTime::parse("next tuesday").unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate(_)));
    assert!(parse_civil_date("2025-13-01").is_err());
}

#[test]
fn names_render_in_civil_zone() {
    let day = civil("2025-06-08T10:00");

    assert_eq!(day.weekday_short(), "Sun");
    assert_eq!(day.weekday_long(), "Sunday");
    assert_eq!(day.month_short(), "Jun");
    assert_eq!(day.month_long(), "June");
    assert_eq!(day.day_of_month(), 8);
    assert_eq!(day.long_heading(), "Sunday, June 8");
    assert_eq!(day.short_label(), "Jun 8, Sun");
}

#[test]
fn utc_instant_late_saturday_is_sunday_in_berlin() {
    assert_eq!(civil("2025-06-07T23:00:00Z").weekday_short(), "Sun");
}

#[test]
fn anchors_and_day_differences() {
    let start = parse_civil_date("2025-06-07").unwrap();
    let end = parse_civil_date("2025-06-22").unwrap();

    assert_eq!(anchor_id(start), "date-2025-06-07");
    assert_eq!(days_between(start, end), 15);
    assert_eq!(days_between(end, start), -15);
}

#[test]
fn display_is_rfc3339_with_civil_offset() {
    assert_eq!(civil("2025-06-08T18:30").to_string(), "2025-06-08T18:30:00+02:00");
    assert_eq!(civil("2025-01-08T18:30").to_string(), "2025-01-08T18:30:00+01:00");
}
