use cardcalc_types::{HitMix, HitType};
use hashbrown::HashMap;

use super::DamageSeries;
use crate::actors::{ActorId, ActorList};

/// Damage of one actor split by hit classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitBreakdown {
    amounts: [i64; 5],
}

impl HitBreakdown {
    pub fn add(&mut self, hit: HitType, amount: i64) {
        self.amounts[hit.index()] += amount;
    }

    pub fn get(&self, hit: HitType) -> i64 {
        self.amounts[hit.index()]
    }

    pub fn total(&self) -> i64 {
        self.amounts.iter().sum()
    }

    pub fn to_mix(&self) -> HitMix {
        HitMix::from_amounts(self.amounts)
    }
}

/// Per-actor damage over one time range.
///
/// Every tracked player and every kept pet has an entry, zero when the actor
/// did nothing in the range. Player totals include their pets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribution {
    pub players: HashMap<ActorId, i64>,
    pub pets: HashMap<ActorId, i64>,
    /// Present only for detailed attribution. Player entries include pets.
    pub hits: Option<HashMap<ActorId, HitBreakdown>>,
}

impl Attribution {
    pub fn player_damage(&self, id: ActorId) -> i64 {
        self.players.get(&id).copied().unwrap_or_default()
    }

    pub fn pet_damage(&self, id: ActorId) -> i64 {
        self.pets.get(&id).copied().unwrap_or_default()
    }

    pub fn hit_breakdown(&self, id: ActorId) -> HitBreakdown {
        self.hits
            .as_ref()
            .and_then(|hits| hits.get(&id))
            .copied()
            .unwrap_or_default()
    }
}

/// Sum damage in `[start, end)` per source, folding pets into their owners.
/// Damage from untracked sources is ignored.
pub fn attribute(
    series: &DamageSeries,
    start: i64,
    end: i64,
    actors: &ActorList,
    detailed: bool,
) -> Attribution {
    let mut players: HashMap<ActorId, i64> =
        actors.player_ids().iter().map(|&id| (id, 0)).collect();
    let mut pets: HashMap<ActorId, i64> = actors.pets().map(|pet| (pet.id, 0)).collect();
    let mut hits: Option<HashMap<ActorId, HitBreakdown>> = detailed.then(|| {
        players
            .keys()
            .chain(pets.keys())
            .map(|&id| (id, HitBreakdown::default()))
            .collect()
    });

    for event in series.range(start, end) {
        let Some(owner) = actors.owner_of(event.source_id) else {
            continue;
        };

        if let Some(total) = players.get_mut(&owner) {
            *total += event.amount;
        }
        if owner != event.source_id
            && let Some(total) = pets.get_mut(&event.source_id)
        {
            *total += event.amount;
        }

        if let Some(hits) = hits.as_mut() {
            if let Some(breakdown) = hits.get_mut(&owner) {
                breakdown.add(event.hit, event.amount);
            }
            if owner != event.source_id
                && let Some(breakdown) = hits.get_mut(&event.source_id)
            {
                breakdown.add(event.hit, event.amount);
            }
        }
    }

    Attribution {
        players,
        pets,
        hits,
    }
}
