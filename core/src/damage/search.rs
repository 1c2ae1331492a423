use hashbrown::HashMap;

use super::DamageSeries;
use crate::actors::{ActorId, ActorList};

/// Parameters of one burst search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: i64,
    pub end: i64,
    pub duration: i64,
    pub step: i64,
}

/// Damage per (offset, player) over `[offset, offset + duration)`.
/// Pet damage is folded into owners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageSurface {
    offsets: Vec<i64>,
    players: Vec<ActorId>,
    /// One row per offset, columns follow `players`
    rows: Vec<Vec<i64>>,
}

impl DamageSurface {
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    pub fn players(&self) -> &[ActorId] {
        &self.players
    }

    pub fn damage_at(&self, offset_index: usize, actor: ActorId) -> Option<i64> {
        let column = self.players.iter().position(|&id| id == actor)?;
        self.rows.get(offset_index).map(|row| row[column])
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Flatten to `(timestamp, actor, damage)` triples
    pub fn cells(&self) -> impl Iterator<Item = TimingCandidate> + '_ {
        self.offsets.iter().zip(&self.rows).flat_map(move |(&timestamp, row)| {
            self.players
                .iter()
                .zip(row)
                .map(move |(&actor_id, &damage)| TimingCandidate {
                    timestamp,
                    actor_id,
                    damage,
                })
        })
    }
}

/// Slide a fixed-length window across `[window.start, window.end)` and record
/// each player's damage at every step.
///
/// Maintains running per-player totals with two cursors into the series, so
/// each event is added and removed at most once.
pub fn search_burst_window(series: &DamageSeries, window: SearchWindow, actors: &ActorList) -> DamageSurface {
    let players = actors.player_ids().to_vec();
    if window.step <= 0 {
        tracing::warn!(step = window.step, "Burst search step must be positive");
        return DamageSurface {
            players,
            ..Default::default()
        };
    }

    let columns: HashMap<ActorId, usize> = players.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let column_of = |source: ActorId| {
        actors
            .owner_of(source)
            .and_then(|owner| columns.get(&owner).copied())
    };

    let events = series.events();
    let mut totals = vec![0i64; players.len()];
    let mut lo = series.lower_bound(window.start);
    let mut hi = lo;

    let mut offsets = Vec::new();
    let mut rows = Vec::new();
    let mut offset = window.start;

    while offset < window.end {
        let window_end = offset + window.duration;

        while hi < events.len() && events[hi].timestamp < window_end {
            if let Some(column) = column_of(events[hi].source_id) {
                totals[column] += events[hi].amount;
            }
            hi += 1;
        }
        while lo < hi && events[lo].timestamp < offset {
            if let Some(column) = column_of(events[lo].source_id) {
                totals[column] -= events[lo].amount;
            }
            lo += 1;
        }

        offsets.push(offset);
        rows.push(totals.clone());
        offset += window.step;
    }

    DamageSurface { offsets, players, rows }
}

/// One candidate play time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingCandidate {
    pub timestamp: i64,
    pub actor_id: ActorId,
    pub damage: i64,
}

/// Best `count` cells for actors accepted by `include`, highest damage first.
///
/// A cell is skipped when an accepted cell for the same actor lies less than
/// `dedup_radius` ms away. Selection stops at the first zero-damage cell.
/// Ties break on earlier timestamp, then lower actor id.
pub fn top_candidates(
    surface: &DamageSurface,
    include: impl Fn(ActorId) -> bool,
    count: usize,
    dedup_radius: i64,
) -> Vec<TimingCandidate> {
    let mut cells: Vec<TimingCandidate> = surface.cells().filter(|c| include(c.actor_id)).collect();
    cells.sort_by(|a, b| {
        b.damage
            .cmp(&a.damage)
            .then(a.timestamp.cmp(&b.timestamp))
            .then(a.actor_id.cmp(&b.actor_id))
    });

    let mut accepted: Vec<TimingCandidate> = Vec::with_capacity(count);
    for cell in cells {
        if accepted.len() >= count || cell.damage <= 0 {
            break;
        }
        let duplicate = accepted
            .iter()
            .any(|a| a.actor_id == cell.actor_id && (a.timestamp - cell.timestamp).abs() < dedup_radius);
        if !duplicate {
            accepted.push(cell);
        }
    }
    accepted
}
