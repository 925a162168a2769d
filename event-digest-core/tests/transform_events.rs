use chrono::NaiveDate;
use event_digest_core::contract::Event;
use event_digest_core::load::read_local_events;
use event_digest_core::error::DigestError;
use event_digest_core::transform::{filter_today, group_by_category};
use std::fs;
use tempfile::tempdir;

fn sample_events() -> Vec<Event> {
    vec![
        Event::new("Dune", "movie", "2025-03-14T20:00"),
        Event::new("Chess night", "Game", "2025-03-15"),
        Event::new("Jazz trio", "MUSIC", "2025-03-14T21:30").with_location("Blue Note"),
        Event::new("Alien", "Movie", "2025-03-16"),
        Event::new("Marathon", "sport", "14/03/2025"),
    ]
}

#[test]
fn test_group_by_category_partitions_exactly() {
    let events = sample_events();
    let grouped = group_by_category(&events);

    assert_eq!(grouped.total_events(), events.len());
    assert_eq!(
        grouped.categories().collect::<Vec<_>>(),
        vec!["MOVIE", "GAME", "MUSIC", "SPORT"]
    );

    let movies: Vec<&str> = grouped
        .get("MOVIE")
        .unwrap()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(movies, vec!["Dune", "Alien"]);

    // every input event sits under exactly one group, keyed by its uppercased category
    for event in &events {
        let hits = grouped
            .iter()
            .filter(|(_, group)| group.contains(event))
            .count();
        assert_eq!(hits, 1, "{} should appear once", event.name);
        assert!(grouped
            .get(&event.category.to_uppercase())
            .unwrap()
            .contains(event));
    }
}

#[test]
fn test_group_by_category_missing_category_goes_to_other() {
    let events = vec![
        Event::new("Mystery", "", "2025-03-14"),
        Event::new("Blank", "   ", "2025-03-14"),
        Event::new("Explicit", "other", "2025-03-14"),
    ];
    let grouped = group_by_category(&events);

    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped.get("OTHER").map(|g| g.len()), Some(3));
}

#[test]
fn test_group_by_category_keeps_surrounding_whitespace_in_key() {
    let events = vec![
        Event::new("Padded", " movie ", "2025-03-14"),
        Event::new("Plain", "movie", "2025-03-14"),
    ];
    let grouped = group_by_category(&events);

    assert_eq!(
        grouped.categories().collect::<Vec<_>>(),
        vec![" MOVIE ", "MOVIE"]
    );
    assert_eq!(grouped.get(" MOVIE ").map(|g| g.len()), Some(1));
    assert_eq!(events[0].category_key(), " MOVIE ");
}

#[test]
fn test_group_by_category_empty_input() {
    let grouped = group_by_category(&[]);
    assert!(grouped.is_empty());
    assert_eq!(grouped.total_events(), 0);
}

#[test]
fn test_filter_today_uses_literal_prefix() {
    let events = sample_events();
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    let names: Vec<String> = filter_today(&events, today)
        .into_iter()
        .map(|e| e.name)
        .collect();

    // "14/03/2025" is the same day written differently and must not match
    assert_eq!(names, vec!["Dune".to_string(), "Jazz trio".to_string()]);
}

#[test]
fn test_filter_today_no_match() {
    let events = sample_events();
    let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    assert!(filter_today(&events, today).is_empty());
}

#[test]
fn test_local_events_keep_unknown_fields_and_default_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(
        &path,
        r#"[
            {"name": "Dune", "category": "movie", "datetime": "2025-03-14", "price": 12},
            {"name": "Gig", "datetime": "2025-03-15", "location": "Paradiso"}
        ]"#,
    )
    .unwrap();

    let events = read_local_events(&path).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].extra.get("price"), Some(&serde_json::json!(12)));
    assert_eq!(events[0].location_or_default(), "TBA");
    assert_eq!(events[1].category_key(), "OTHER");
    assert_eq!(events[1].location_or_default(), "Paradiso");

    let round_tripped = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(round_tripped["price"], serde_json::json!(12));
    assert!(round_tripped.get("location").is_none());
}

#[test]
fn test_local_events_missing_required_field_is_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(&path, r#"[{"category": "movie", "datetime": "2025-03-14"}]"#).unwrap();

    let err = read_local_events(&path).unwrap_err();
    assert!(
        matches!(err, DigestError::MalformedSource { .. }),
        "Expected MalformedSource, got: {err:?}"
    );
}
