use super::*;
use crate::context::resolve;

fn row() -> RawRow {
    RawRow {
        game_id: Some("0022400561".to_string()),
        action_number: Some(42.0),
        period: Some(1.0),
        clock: Some("PT11M30.00S".to_string()),
        action_type: Some("2pt".to_string()),
        sub_type: Some("Jump Shot".to_string()),
        description: Some("Curry 2pt Shot: Made (4 PTS)".to_string()),
        player_name: Some("Curry".to_string()),
        person_id: Some(201939.0),
        team_id: Some(1610612744.0),
        team_tricode: Some("GSW".to_string()),
        score_home: Some(4.0),
        score_away: Some(0.0),
        shot_result: Some("Made".to_string()),
        person_ids_filter: None,
        points: Some(2.0),
        ..RawRow::default()
    }
}

#[test]
fn parse_row_shot() {
    let parser = EventParser::new();
    let event = parser.parse_row(1, row()).unwrap();

    assert_eq!(resolve(event.game_id), "0022400561");
    assert_eq!(event.order, 42);
    assert_eq!(event.period, 1);
    assert_eq!(event.seconds_remaining, 690.0);
    assert_eq!(event.kind, EventKind::Shot);
    assert_eq!(event.player_id, Some(201939));
    assert_eq!(event.team_id, Some(1610612744));
    assert_eq!(resolve(event.team_tricode), "GSW");
    assert_eq!(event.shot_result, Some(ShotResult::Made));
    assert_eq!(event.score_home, Some(4));
    assert_eq!(event.stats.points, 2);
}

#[test]
fn parse_row_requires_game_id() {
    let parser = EventParser::new();
    let mut no_id = row();
    no_id.game_id = None;
    assert!(parser.parse_row(1, no_id).is_none());

    let mut blank_id = row();
    blank_id.game_id = Some("  ".to_string());
    assert!(parser.parse_row(1, blank_id).is_none());
}

#[test]
fn parse_row_falls_back_to_sequence_number() {
    let parser = EventParser::new();
    let mut no_order = row();
    no_order.action_number = None;
    let event = parser.parse_row(7, no_order).unwrap();
    assert_eq!(event.order, 7);
}

#[test]
fn parse_row_malformed_clock_fails_soft() {
    let parser = EventParser::new();
    let mut bad_clock = row();
    bad_clock.clock = Some("PTxxMyyS".to_string());
    let event = parser.parse_row(1, bad_clock).unwrap();
    assert_eq!(event.seconds_remaining, 0.0);
}

#[test]
fn parse_row_zero_ids_are_absent() {
    let parser = EventParser::new();
    let mut neutral = row();
    neutral.person_id = Some(0.0);
    neutral.team_id = Some(0.0);
    let event = parser.parse_row(1, neutral).unwrap();
    assert_eq!(event.player_id, None);
    assert_eq!(event.team_id, None);
}

#[test]
fn classify_labels() {
    let cases = [
        ("3pt", EventKind::Shot),
        ("freethrow", EventKind::FreeThrow),
        ("rebound", EventKind::Rebound),
        ("turnover", EventKind::Turnover),
        ("foul", EventKind::Foul),
        ("substitution", EventKind::Substitution),
        ("timeout", EventKind::Timeout),
        ("period", EventKind::PeriodMarker),
        ("jumpball", EventKind::Other),
    ];
    let parser = EventParser::new();
    for (label, expected) in cases {
        let mut raw = row();
        raw.action_type = Some(label.to_string());
        raw.description = Some(String::new());
        let event = parser.parse_row(1, raw).unwrap();
        assert_eq!(event.kind, expected, "label {label}");
    }
}

#[test]
fn classify_numeric_message_types() {
    let parser = EventParser::new();
    let mut raw = row();
    raw.action_type = Some("9".to_string());
    let event = parser.parse_row(1, raw).unwrap();
    assert_eq!(event.kind, EventKind::Timeout);

    let mut raw = row();
    raw.action_type = Some("8".to_string());
    let event = parser.parse_row(1, raw).unwrap();
    assert_eq!(event.kind, EventKind::Substitution);
}

#[test]
fn classify_falls_back_to_description() {
    let parser = EventParser::new();
    let mut raw = row();
    raw.action_type = None;
    raw.description = Some("GSW Timeout".to_string());
    let event = parser.parse_row(1, raw).unwrap();
    assert_eq!(event.kind, EventKind::Timeout);

    let mut raw = row();
    raw.action_type = Some("unheard-of".to_string());
    raw.description = Some("SUB out: Looney".to_string());
    let event = parser.parse_row(1, raw).unwrap();
    assert_eq!(event.kind, EventKind::Substitution);
}

#[test]
fn rebound_direction_from_sub_type_or_stats() {
    let parser = EventParser::new();
    let mut raw = row();
    raw.action_type = Some("rebound".to_string());
    raw.sub_type = Some("offensive".to_string());
    let event = parser.parse_row(1, raw).unwrap();
    assert!(event.is_offensive_rebound());
    assert!(!event.is_defensive_rebound());

    let mut raw = row();
    raw.action_type = Some("rebound".to_string());
    raw.sub_type = None;
    raw.rebounds_def = Some(1.0);
    let event = parser.parse_row(1, raw).unwrap();
    assert!(event.is_defensive_rebound());
}
