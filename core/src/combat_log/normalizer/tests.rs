use super::*;
use cardcalc_types::HitType;
use crate::combat_log::classify_hit;

fn raw(json: &str) -> RawEvent {
    serde_json::from_str(json).unwrap()
}

fn streams() -> DamageStreams {
    DamageStreams {
        raw: vec![
            raw(r#"{"timestamp":3000,"type":"damage","sourceID":1,"targetID":50,"abilityGameID":7,"amount":100,"hitType":2,"directHit":true}"#),
            raw(r#"{"timestamp":1000,"type":"damage","source":{"id":2},"targetID":50,"abilityGameID":8,"amount":40}"#),
            raw(r#"{"timestamp":1500,"type":"calculateddamage","sourceID":1,"targetID":50,"abilityGameID":7,"amount":90}"#),
            raw(r#"{"timestamp":2000,"type":"damage","sourceID":3,"targetID":50,"abilityGameID":799,"amount":55,"supportID":1}"#),
        ],
        tick: vec![
            raw(r#"{"timestamp":2000,"type":"damage","sourceID":1,"targetID":50,"abilityGameID":1000838,"amount":300,"tick":true}"#),
        ],
        debuffs: vec![
            raw(r#"{"timestamp":2000,"type":"removedebuff","sourceID":1,"targetID":50,"abilityGameID":1000838}"#),
            raw(r#"{"timestamp":2000,"type":"applydebuff","sourceID":1,"targetID":50,"abilityGameID":1000838}"#),
            raw(r#"{"timestamp":2000,"type":"refreshdebuff","sourceID":1,"targetID":50,"abilityGameID":1000838}"#),
            raw(r#"{"timestamp":1200,"type":"applydebuff","sourceID":1,"targetID":50,"abilityGameID":1000493}"#),
            raw(r#"{"timestamp":1300,"type":"applydebuffstack","sourceID":1,"targetID":50,"abilityGameID":1000838}"#),
        ],
        ground: vec![],
    }
}

#[test]
fn test_instant_damage_sorted_and_filtered() {
    let normalized = normalize_damage(&streams(), &DamageConfig::default());
    let times: Vec<i64> = normalized.instant.iter().map(|e| e.timestamp).collect();
    assert_eq!(times, vec![1000, 2000, 3000]);
}

#[test]
fn test_nested_source_is_repaired() {
    let normalized = normalize_damage(&streams(), &DamageConfig::default());
    assert_eq!(normalized.instant[0].source_id, 2);
}

#[test]
fn test_support_damage_is_redirected() {
    let normalized = normalize_damage(&streams(), &DamageConfig::default());
    assert_eq!(normalized.instant[1].ability_id, 799);
    assert_eq!(normalized.instant[1].source_id, 1);

    let config = DamageConfig {
        support_redirect_abilities: vec![],
        ..DamageConfig::default()
    };
    let normalized = normalize_damage(&streams(), &config);
    assert_eq!(normalized.instant[1].source_id, 3);
}

#[test]
fn test_same_timestamp_priority() {
    let normalized = normalize_damage(&streams(), &DamageConfig::default());
    let kinds: Vec<u8> = normalized.periodic.iter().map(|e| e.kind.priority()).collect();
    // apply, refresh, damage, remove; ignored debuff and stack change dropped
    assert_eq!(kinds, vec![1, 2, 3, 4]);
}

#[test]
fn test_hit_classification() {
    let normalized = normalize_damage(&streams(), &DamageConfig::default());
    let hit = |idx: usize| match normalized.instant[idx].kind {
        EventKind::Damage { hit, .. } => hit,
        _ => panic!("not damage"),
    };
    assert_eq!(hit(0), HitType::Normal);
    assert_eq!(hit(2), HitType::CriticalDirect);

    assert_eq!(classify_hit(Some(1), Some(true)), HitType::Direct);
    assert_eq!(classify_hit(Some(2), None), HitType::Critical);
    assert_eq!(classify_hit(None, None), HitType::Normal);
}

#[test]
fn test_events_without_source_are_dropped() {
    let events = normalize_events(&[
        raw(r#"{"timestamp":10,"type":"cast","abilityGameID":3590}"#),
        raw(r#"{"timestamp":5,"type":"cast","sourceID":4,"abilityGameID":3590}"#),
    ]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source_id, 4);
}
