//! Tests for date grouping and jump anchors.

use timeline_engine::civil::parse_civil_date;
use timeline_engine::{day_anchors, group_by_date, split_events, Event, GridConfig};

#[test]
fn groups_are_keyed_chronologically() {
    let events = vec![
        Event::new("Late", "2025-06-12", 1).unwrap(),
        Event::new("Early", "2025-06-09", 2).unwrap(),
    ];
    let segments = split_events(&events).unwrap();

    let groups = group_by_date(&segments);
    let keys: Vec<String> = groups.keys().map(|d| d.to_string()).collect();

    assert_eq!(keys, ["2025-06-09", "2025-06-10", "2025-06-12"]);
}

#[test]
fn every_segment_appears_exactly_once() {
    let events = vec![
        Event::new("A", "2025-06-09", 3).unwrap(),
        Event::new("B", "2025-06-10", 2).unwrap(),
    ];
    let segments = split_events(&events).unwrap();

    let groups = group_by_date(&segments);
    let total: usize = groups.values().map(Vec::len).sum();

    assert_eq!(total, segments.len());
    assert_eq!(groups[&parse_civil_date("2025-06-10").unwrap()].len(), 2);
}

#[test]
fn segments_within_a_date_are_ordered_by_start() {
    let events = vec![
        Event::new("Conference", "2025-06-08", 2)
            .unwrap()
            .with_day(1, "10:00", "17:00")
            .unwrap(),
        Event::new("Breakfast", "2025-06-09", 1)
            .unwrap()
            .with_day(0, "08:00", "09:00")
            .unwrap(),
        Event::new("Panel", "2025-06-09", 1)
            .unwrap()
            .with_day(0, "10:00", "11:00")
            .unwrap(),
    ];
    let segments = split_events(&events).unwrap();

    let groups = group_by_date(&segments);
    let day_two: Vec<String> = groups[&parse_civil_date("2025-06-09").unwrap()]
        .iter()
        .map(|s| s.title())
        .collect();

    // Equal starts keep input order: Conference was listed before Panel.
    assert_eq!(day_two, ["Breakfast", "Conference (Day 2/2)", "Panel"]);
}

#[test]
fn empty_input_has_no_groups() {
    assert!(group_by_date(&[]).is_empty());
}

#[test]
fn anchors_cover_every_grid_day() {
    let config = GridConfig::default();
    let today = parse_civil_date("2025-06-08").unwrap();

    let anchors = day_anchors(&config, today);

    assert_eq!(anchors.len(), 16);
    assert_eq!(anchors[0].anchor, "date-2025-06-07");
    assert_eq!(anchors[0].day, "7");
    assert_eq!(anchors[0].weekday, "Sat");
    assert_eq!(anchors[15].anchor, "date-2025-06-22");
    assert!(anchors[1].is_today);
    assert_eq!(anchors.iter().filter(|a| a.is_today).count(), 1);
}

#[test]
fn no_anchor_is_today_outside_range() {
    let anchors = day_anchors(&GridConfig::default(), parse_civil_date("2025-07-01").unwrap());
    assert!(anchors.iter().all(|a| !a.is_today));
}
