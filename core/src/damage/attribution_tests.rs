use cardcalc_types::HitType;

use super::*;
use crate::actors::{ActorList, Pet, Player};

fn actors() -> ActorList {
    ActorList::new(
        vec![
            Player::new(1, "Alpha", "Summoner"),
            Player::new(2, "Beta", "Dragoon"),
            Player::new(3, "Gamma", "Astrologian"),
        ],
        vec![Pet::new(10, "Carbuncle", 1), Pet::new(11, "Stray", 99)],
    )
}

fn hit(timestamp: i64, source_id: i64, amount: i64, hit: HitType) -> DamageEvent {
    DamageEvent {
        timestamp,
        source_id,
        target_id: 500,
        ability_id: 1,
        amount,
        hit,
    }
}

fn series() -> DamageSeries {
    DamageSeries::new(vec![
        hit(0, 1, 100, HitType::Normal),
        hit(1000, 10, 50, HitType::Critical),
        hit(2000, 2, 300, HitType::Direct),
        hit(3000, 1, 80, HitType::Dot),
        hit(3000, 11, 999, HitType::Normal),
        hit(4000, 42, 777, HitType::Normal),
        hit(5000, 2, 60, HitType::CriticalDirect),
    ])
}

#[test]
fn pets_fold_into_owner_and_report_standalone() {
    let actors = actors();
    let result = attribute(&series(), 0, 10_000, &actors, false);

    assert_eq!(result.player_damage(1), 230);
    assert_eq!(result.pet_damage(10), 50);
    assert_eq!(result.player_damage(2), 360);
    assert!(result.hits.is_none());
}

#[test]
fn every_player_has_an_entry() {
    let actors = actors();
    let result = attribute(&series(), 0, 10_000, &actors, true);

    assert_eq!(result.players.len(), 3);
    assert_eq!(result.players.get(&3), Some(&0));
    assert_eq!(result.hit_breakdown(3), HitBreakdown::default());
    assert!(result.hits.as_ref().is_some_and(|hits| hits.contains_key(&3)));
}

#[test]
fn owner_total_is_own_damage_plus_pets() {
    let actors = actors();
    let series = series();
    let result = attribute(&series, 0, 10_000, &actors, false);

    let own: i64 = series
        .events()
        .iter()
        .filter(|e| e.source_id == 1)
        .map(|e| e.amount)
        .sum();
    let pets: i64 = actors
        .pets()
        .filter(|p| p.owner == 1)
        .map(|p| result.pet_damage(p.id))
        .sum();
    assert_eq!(result.player_damage(1), own + pets);
}

#[test]
fn range_is_half_open() {
    let actors = actors();
    let result = attribute(&series(), 1000, 3000, &actors, false);

    assert_eq!(result.player_damage(1), 50);
    assert_eq!(result.player_damage(2), 300);
}

#[test]
fn orphan_pets_and_unknown_sources_are_ignored() {
    let actors = actors();
    let result = attribute(&series(), 3000, 4001, &actors, false);

    assert_eq!(result.player_damage(1), 80);
    assert!(!result.pets.contains_key(&11));
    let total: i64 = result.players.values().sum();
    assert_eq!(total, 80);
}

#[test]
fn detailed_breakdown_buckets_hits() {
    let actors = actors();
    let result = attribute(&series(), 0, 10_000, &actors, true);

    let alpha = result.hit_breakdown(1);
    assert_eq!(alpha.get(HitType::Normal), 100);
    assert_eq!(alpha.get(HitType::Critical), 50);
    assert_eq!(alpha.get(HitType::Dot), 80);
    assert_eq!(alpha.total(), result.player_damage(1));

    let carbuncle = result.hit_breakdown(10);
    assert_eq!(carbuncle.total(), 50);

    let mix = result.hit_breakdown(2).to_mix();
    assert!((mix.direct - 83.33).abs() < 0.01);
    assert!((mix.critical_direct - 16.67).abs() < 0.01);
    assert_eq!(mix.dot, 0.0);
}
