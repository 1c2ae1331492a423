use std::path::Path;

use cardcalc_types::{AnalysisConfig, Role};
use serde_json::json;

use super::*;
use crate::combat_log::{FightDump, read_fight_dump};

fn load_fixture(name: &str) -> Option<FightDump> {
    let path = Path::new("../integration-tests/fixtures").join(name);
    if !path.exists() {
        eprintln!("Skipping test: fixture file not found at {:?}", path);
        return None;
    }
    Some(read_fight_dump(&path).unwrap())
}

/// Minimal dump with the given card and draw streams.
fn synthetic_dump(card_events: serde_json::Value, draw_events: serde_json::Value) -> FightDump {
    serde_json::from_value(json!({
        "report": {
            "code": "synth",
            "fights": [{ "id": 7, "startTime": 0, "endTime": 60000, "name": "Synthetic" }]
        },
        "fightId": 7,
        "players": [
            { "id": 1, "name": "Astro", "type": "Astrologian" },
            { "id": 2, "name": "Monk", "type": "Monk" },
            { "id": 3, "name": "Ninja", "type": "Ninja" },
            { "id": 9, "name": "Limit Break", "type": "LimitBreak" }
        ],
        "cardEvents": card_events,
        "drawEvents": draw_events,
        "damage": {
            "raw": [
                { "timestamp": 12000, "type": "damage", "sourceID": 2, "targetID": 500, "abilityGameID": 1, "amount": 1080 },
                { "timestamp": 13000, "type": "damage", "sourceID": 3, "targetID": 500, "abilityGameID": 1, "amount": 5000 },
                { "timestamp": 14000, "type": "damage", "sourceID": 9, "targetID": 500, "abilityGameID": 1, "amount": 90000 }
            ]
        }
    }))
    .unwrap()
}

fn one_draw() -> serde_json::Value {
    json!([{ "timestamp": 5000, "type": "cast", "sourceID": 1, "targetID": 1, "abilityGameID": 3590 }])
}

fn sequential() -> AnalysisConfig {
    AnalysisConfig {
        parallel: false,
        ..Default::default()
    }
}

#[test]
fn test_short_pull_windows() {
    let Some(dump) = load_fixture("short_pull.json") else {
        return;
    };

    let analysis = analyze_dump(&dump, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.encounter.name, "Test Encounter");
    assert_eq!(analysis.encounter.duration, "01:00.000");
    assert!(analysis.encounter.kill);
    assert_eq!(analysis.actors.len(), 5);

    let bounds: Vec<(i64, i64, &str, &str)> = analysis
        .windows
        .iter()
        .map(|w| (w.start, w.end, w.start_event.as_str(), w.end_event.as_str()))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (1_000_000, 1_005_000, "Fight Start", "Draw"),
            (1_005_000, 1_035_000, "Draw", "Draw"),
            (1_035_000, 1_060_000, "Draw", "Fight End"),
        ]
    );
    assert_eq!(analysis.windows[1].drawn_card.as_deref(), Some("The Balance"));
    assert_eq!(analysis.windows[2].drawn_card.as_deref(), Some("The Spear"));
    assert!(analysis.windows[0].card.is_none());
}

#[test]
fn test_short_pull_card_damage_table() {
    let Some(dump) = load_fixture("short_pull.json") else {
        return;
    };

    let analysis = analyze_dump(&dump, &AnalysisConfig::default()).unwrap();
    let card = analysis.windows[1].card.as_ref().unwrap();

    assert_eq!(card.card_name, "The Balance");
    assert_eq!(card.target_id, 2);
    assert_eq!(card.play_time, "00:09.900");
    assert_eq!(card.duration_secs, 15.0);

    let rows: Vec<(i64, i64, i64)> = card
        .damage_table
        .iter()
        .map(|r| (r.id, r.real_damage, r.adjusted_damage))
        .collect();
    assert_eq!(rows, vec![(2, 20_000, 20_000), (4, 10_200, 10_200), (3, 12_000, 6000), (1, 0, 0)]);

    let target = &card.damage_table[0];
    assert_eq!(target.bonus_damage, 1200);
    assert!((target.hit_mix.critical - 50.0).abs() < 1e-9);
    assert!((target.hit_mix.direct - 50.0).abs() < 1e-9);
    assert!(card.damage_table.iter().all(|r| !r.has_card));

    assert_eq!(card.optimal_target, Some(2));
    assert_eq!(card.optimal_target_name.as_deref(), Some("Kenki Blade"));
    assert!(card.correct);
    assert!(card.correct_role);
}

#[test]
fn test_short_pull_mismatched_card() {
    let Some(dump) = load_fixture("short_pull.json") else {
        return;
    };

    let analysis = analyze_dump(&dump, &AnalysisConfig::default()).unwrap();
    let card = analysis.windows[2].card.as_ref().unwrap();

    assert_eq!(card.card_name, "The Spear");
    assert_eq!(card.card_role, Role::Melee);
    assert_eq!((card.start, card.end), (1_040_000, 1_055_000));
    assert_eq!(card.play_time, "00:40.000");

    let machinist = card.damage_table.iter().find(|r| r.id == 3).unwrap();
    assert_eq!(machinist.real_damage, 10_000);
    assert_eq!(machinist.adjusted_damage, 5000);

    assert_eq!(card.optimal_target, Some(2));
    assert!(!card.correct);
    assert!(!card.correct_role);
}

#[test]
fn test_short_pull_alternative_timings() {
    let Some(dump) = load_fixture("short_pull.json") else {
        return;
    };

    let analysis = analyze_dump(&dump, &AnalysisConfig::default()).unwrap();
    let window = &analysis.windows[1];

    let melee_best = window.melee.best.as_ref().unwrap();
    assert_eq!(melee_best.actor_id, 2);
    assert_eq!(melee_best.timestamp, 1_006_000);
    assert_eq!(melee_best.damage, 20_000);
    assert_eq!(melee_best.time, "00:06");
    assert_eq!(window.melee.entries.len(), 8);
    assert_eq!(
        window.melee.entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
        (1..=8).collect::<Vec<_>>()
    );

    let ranged: Vec<(i64, i64, i64)> = window
        .ranged
        .entries
        .iter()
        .map(|e| (e.timestamp, e.actor_id, e.damage))
        .collect();
    assert_eq!(
        ranged,
        vec![
            (1_005_000, 3, 12_000),
            (1_009_000, 3, 12_000),
            (1_013_000, 3, 12_000),
            (1_031_000, 3, 10_000),
        ]
    );
    assert_eq!(window.ranged.best.as_ref().map(|e| e.actor_name.as_str()), Some("Gear Head"));
}

#[test]
fn test_parallel_matches_sequential() {
    let Some(dump) = load_fixture("short_pull.json") else {
        return;
    };

    let parallel = analyze_dump(&dump, &AnalysisConfig::default()).unwrap();
    let sequential = analyze_dump(&dump, &sequential()).unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_no_card_plays_is_an_error() {
    let dump = synthetic_dump(json!([]), one_draw());

    let err = analyze_dump(&dump, &sequential()).unwrap_err();

    assert!(matches!(err, AnalysisError::NoCardPlays { fight_id: 7 }));
}

#[test]
fn test_no_draws_is_an_error() {
    let cards = json!([
        { "timestamp": 10000, "type": "applybuff", "sourceID": 1, "targetID": 2, "abilityGameID": 1001876 }
    ]);
    let dump = synthetic_dump(cards, json!([]));

    let err = analyze_dump(&dump, &sequential()).unwrap_err();

    assert!(matches!(err, AnalysisError::NoDrawEvents { fight_id: 7 }));
}

#[test]
fn test_drawn_card_without_draw_cast_is_an_error() {
    let cards = json!([
        { "timestamp": 10000, "type": "applybuff", "sourceID": 1, "targetID": 2, "abilityGameID": 1001876 }
    ]);
    let draws = json!([
        { "timestamp": 5000, "type": "applybuff", "sourceID": 1, "targetID": 1, "abilityGameID": 1000913 }
    ]);
    let dump = synthetic_dump(cards, draws);

    let err = analyze_dump(&dump, &sequential()).unwrap_err();

    assert!(matches!(err, AnalysisError::NoDrawEvents { fight_id: 7 }));
}

#[test]
fn test_missing_fight_is_an_error() {
    let mut dump = synthetic_dump(json!([]), one_draw());
    dump.fight_id = 12;

    let err = analyze_dump(&dump, &sequential()).unwrap_err();

    assert!(matches!(err, AnalysisError::FightNotFound { fight_id: 12, .. }));
}

#[test]
fn test_target_with_running_card_is_not_optimal() {
    // Ninja already holds an Arrow from 8s to 23s when the Lord lands at 11s
    let cards = json!([
        { "timestamp": 8000, "type": "applybuff", "sourceID": 1, "targetID": 3, "abilityGameID": 1001884 },
        { "timestamp": 11000, "type": "applybuff", "sourceID": 1, "targetID": 2, "abilityGameID": 1001876 },
        { "timestamp": 23000, "type": "removebuff", "sourceID": 1, "targetID": 3, "abilityGameID": 1001884 },
        { "timestamp": 26000, "type": "removebuff", "sourceID": 1, "targetID": 2, "abilityGameID": 1001876 }
    ]);
    let draws = json!([
        { "timestamp": 5000, "type": "cast", "sourceID": 1, "targetID": 1, "abilityGameID": 3590 },
        { "timestamp": 10000, "type": "cast", "sourceID": 1, "targetID": 1, "abilityGameID": 7448 }
    ]);
    let dump = synthetic_dump(cards, draws);

    let analysis = analyze_dump(&dump, &sequential()).unwrap();
    assert_eq!(analysis.windows[1].card.as_ref().map(|c| c.card_name.as_str()), Some("The Arrow"));
    let card = analysis.windows[2].card.as_ref().unwrap();

    assert_eq!(card.card_name, "Lord of Crowns");
    let ninja = card.damage_table.iter().find(|r| r.id == 3).unwrap();
    assert!(ninja.has_card);
    assert_eq!(ninja.prior_card_remaining_ms, Some(12_000));

    let lb = card.damage_table.iter().find(|r| r.id == 9).unwrap();
    assert_eq!(lb.role, Role::LimitBreak);

    assert_eq!(card.damage_table[0].id, 9);
    assert_eq!(card.optimal_target, Some(2));
    assert!(card.correct);

    let monk = card.damage_table.iter().find(|r| r.id == 2).unwrap();
    assert_eq!(monk.real_damage, 1000);
}
