use cardcalc_types::HitType;

use super::*;
use crate::actors::{ActorList, Pet, Player};

fn actors() -> ActorList {
    ActorList::new(
        vec![
            Player::new(1, "Melee", "Reaper"),
            Player::new(2, "Ranged", "Machinist"),
            Player::new(3, "Healer", "Sage"),
        ],
        vec![Pet::new(20, "Queen", 2)],
    )
}

fn hit(timestamp: i64, source_id: i64, amount: i64) -> DamageEvent {
    DamageEvent {
        timestamp,
        source_id,
        target_id: 500,
        ability_id: 1,
        amount,
        hit: HitType::Normal,
    }
}

fn varied_series() -> DamageSeries {
    let sources = [1, 2, 20, 3, 77];
    DamageSeries::new(
        (0..120)
            .map(|i: i64| hit(i * 337 % 40_000, sources[(i % 5) as usize], 100 + (i * 7919) % 5000))
            .collect(),
    )
}

#[test]
fn surface_matches_attribution_at_every_offset() {
    let actors = actors();
    let series = varied_series();

    for (duration, step) in [(15_000, 1000), (2500, 700), (500, 1000), (0, 1000)] {
        let window = SearchWindow {
            start: 3000,
            end: 31_000,
            duration,
            step,
        };
        let surface = search_burst_window(&series, window, &actors);

        assert_eq!(surface.offsets().len(), ((window.end - window.start) as usize).div_ceil(step as usize));
        for (index, &offset) in surface.offsets().iter().enumerate() {
            let expected = attribute(&series, offset, offset + duration, &actors, false);
            for &player in actors.player_ids() {
                assert_eq!(
                    surface.damage_at(index, player),
                    Some(expected.player_damage(player)),
                    "offset {offset} player {player} duration {duration}"
                );
            }
        }
    }
}

#[test]
fn offsets_step_through_half_open_range() {
    let window = SearchWindow {
        start: 1000,
        end: 4000,
        duration: 15_000,
        step: 1000,
    };

    let surface = search_burst_window(&DamageSeries::default(), window, &actors());

    assert_eq!(surface.offsets(), &[1000, 2000, 3000]);
    assert_eq!(surface.cells().count(), 9);
    assert!(surface.cells().all(|cell| cell.damage == 0));
}

#[test]
fn non_positive_step_yields_empty_surface() {
    let window = SearchWindow {
        start: 0,
        end: 4000,
        duration: 15_000,
        step: 0,
    };

    assert!(search_burst_window(&varied_series(), window, &actors()).is_empty());
}

#[test]
fn top_candidates_skip_nearby_peaks_of_same_actor() {
    let series = DamageSeries::new(vec![
        hit(10_000, 1, 5000),
        hit(12_500, 1, 100),
        hit(20_000, 1, 3000),
        hit(11_000, 2, 4000),
    ]);
    let window = SearchWindow {
        start: 0,
        end: 30_000,
        duration: 3000,
        step: 1000,
    };
    let surface = search_burst_window(&series, window, &actors());

    let top = top_candidates(&surface, |_| true, 4, 4000);

    let summary: Vec<(i64, i64, i64)> = top.iter().map(|c| (c.timestamp, c.actor_id, c.damage)).collect();
    assert_eq!(summary, vec![(10_000, 1, 5100), (9000, 2, 4000), (18_000, 1, 3000)]);
}

#[test]
fn dedup_radius_is_exclusive() {
    let series = DamageSeries::new(vec![hit(10_000, 1, 900), hit(14_000, 1, 800)]);
    let window = SearchWindow {
        start: 10_000,
        end: 15_000,
        duration: 1000,
        step: 4000,
    };
    let surface = search_burst_window(&series, window, &actors());

    let top = top_candidates(&surface, |id| id == 1, 8, 4000);

    let times: Vec<i64> = top.iter().map(|c| c.timestamp).collect();
    assert_eq!(times, vec![10_000, 14_000]);
}

#[test]
fn selection_stops_at_zero_damage_and_count() {
    let series = DamageSeries::new(vec![hit(0, 1, 10), hit(10_000, 1, 20), hit(20_000, 1, 30)]);
    let window = SearchWindow {
        start: 0,
        end: 30_000,
        duration: 1000,
        step: 1000,
    };
    let surface = search_burst_window(&series, window, &actors());

    let all = top_candidates(&surface, |id| id == 1, 10, 4000);
    assert_eq!(all.iter().map(|c| c.damage).collect::<Vec<_>>(), vec![30, 20, 10]);

    let two = top_candidates(&surface, |id| id == 1, 2, 4000);
    assert_eq!(two.len(), 2);

    assert!(top_candidates(&surface, |id| id == 3, 10, 4000).is_empty());
    assert!(top_candidates(&surface, |_| true, 0, 4000).is_empty());
}

#[test]
fn role_filter_limits_candidates() {
    let actors = actors();
    let series = varied_series();
    let window = SearchWindow {
        start: 0,
        end: 40_000,
        duration: 15_000,
        step: 1000,
    };
    let surface = search_burst_window(&series, window, &actors);

    let ranged = top_candidates(&surface, |id| id == 2, 6, 4000);

    assert!(!ranged.is_empty());
    assert!(ranged.iter().all(|c| c.actor_id == 2));
    for pair in ranged.windows(2) {
        assert!(pair[0].damage >= pair[1].damage);
    }
}
