use std::collections::VecDeque;

use cardcalc_types::Role;
use hashbrown::HashMap;

use super::FightBounds;
use crate::actors::{ActorId, ActorList};
use crate::combat_log::{CombatEvent, EventKind};
use crate::game_data::{card_for_play_action, get_card_info, is_card_buff};

/// Longest gap between a play cast and the buff landing on its target
const PLAY_PAIRING_MS: i64 = 1_000;

/// One reconstructed card buff interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlay {
    pub start: i64,
    pub end: i64,
    /// Timestamp of the play cast, or `start` when no cast was logged
    pub cast_time: i64,
    pub source_id: ActorId,
    pub target_id: ActorId,
    pub ability_id: i64,
    pub role: Role,
    /// Matching-role multiplier in percent
    pub bonus_pct: i64,
    pub name: &'static str,
}

impl CardPlay {
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this play was already running when `other` started.
    pub fn covers_start_of(&self, other: &CardPlay) -> bool {
        self.start < other.start && other.start < self.end
    }
}

type PlayKey = (ActorId, ActorId, i64);

#[derive(Debug)]
struct CardPlayBuilder {
    bounds: FightBounds,
    default_duration: i64,
    plays: Vec<CardPlay>,
    /// Indices into `plays` of intervals still waiting for an end, oldest first
    open: HashMap<PlayKey, VecDeque<usize>>,
    /// Latest play cast per (source, target, buff)
    casts: HashMap<PlayKey, i64>,
}

impl CardPlayBuilder {
    fn new(bounds: FightBounds, default_duration: i64) -> Self {
        Self {
            bounds,
            default_duration,
            plays: Vec::new(),
            open: HashMap::new(),
            casts: HashMap::new(),
        }
    }

    fn open_play(&mut self, key: PlayKey, timestamp: i64) {
        let Some(info) = get_card_info(key.2) else {
            return;
        };
        let cast_time = self
            .casts
            .remove(&key)
            .filter(|&cast| cast <= timestamp && timestamp - cast <= PLAY_PAIRING_MS)
            .unwrap_or(timestamp);

        self.plays.push(CardPlay {
            start: timestamp,
            end: timestamp,
            cast_time,
            source_id: key.0,
            target_id: key.1,
            ability_id: key.2,
            role: info.role,
            bonus_pct: info.bonus_pct,
            name: info.name,
        });
        self.open.entry(key).or_default().push_back(self.plays.len() - 1);
    }

    /// Close the oldest open interval for `key`. Returns false when none was open.
    fn close_play(&mut self, key: PlayKey, timestamp: i64) -> bool {
        let Some(index) = self.open.get_mut(&key).and_then(VecDeque::pop_front) else {
            return false;
        };
        let play = &mut self.plays[index];
        play.end = timestamp.max(play.start);
        true
    }

    /// Record a play cast. A cast logged after its buff at the same
    /// timestamp belongs to the play that just opened.
    fn record_cast(&mut self, key: PlayKey, timestamp: i64) {
        let latest = self.open.get(&key).and_then(|queue| queue.back()).copied();
        if let Some(index) = latest {
            let play = &mut self.plays[index];
            if play.start == timestamp {
                play.cast_time = timestamp;
                return;
            }
        }
        self.casts.insert(key, timestamp);
    }

    fn handle(&mut self, event: &CombatEvent) {
        if event.kind == EventKind::Cast {
            if let Some(buff) = card_for_play_action(event.ability_id) {
                self.record_cast((event.source_id, event.target_id, buff), event.timestamp);
            }
            return;
        }

        if !is_card_buff(event.ability_id) {
            return;
        }
        let key = (event.source_id, event.target_id, event.ability_id);

        match event.kind {
            EventKind::ApplyBuff => self.open_play(key, event.timestamp),
            EventKind::RefreshBuff => {
                self.close_play(key, event.timestamp);
                self.open_play(key, event.timestamp);
            }
            EventKind::RemoveBuff => {
                if !self.close_play(key, event.timestamp) {
                    self.repair_missing_start(key, event.timestamp);
                }
            }
            _ => {}
        }
    }

    fn repair_missing_start(&mut self, key: PlayKey, end: i64) {
        let start = (end - self.default_duration).max(self.bounds.start).min(end);
        tracing::warn!(
            source = key.0,
            target = key.1,
            card = key.2,
            start,
            end,
            "Card removed without an application, assuming default duration"
        );
        self.open_play(key, start);
        self.close_play(key, end);
    }

    fn finish(mut self) -> Vec<CardPlay> {
        for (key, indices) in self.open.drain() {
            for index in indices {
                let play = &mut self.plays[index];
                play.end = (play.start + self.default_duration)
                    .min(self.bounds.end)
                    .max(play.start);
                tracing::debug!(
                    source = key.0,
                    target = key.1,
                    card = key.2,
                    start = play.start,
                    end = play.end,
                    "Card still active at end of log, assuming default duration"
                );
            }
        }

        self.plays.sort_by_key(|p| (p.start, p.source_id, p.target_id));
        self.plays
    }
}

/// Rebuild card buff intervals from the card event stream.
///
/// `events` must be ordered by [`CombatEvent::sort_key`]. Missing ends
/// close at `min(start + default_duration, fight end)`; removes without an
/// application start at `max(end - default_duration, fight start)`.
pub fn reconstruct_card_plays(
    events: &[CombatEvent],
    bounds: FightBounds,
    default_duration: i64,
) -> Vec<CardPlay> {
    let mut builder = CardPlayBuilder::new(bounds, default_duration);
    for event in events {
        builder.handle(event);
    }

    let plays = builder.finish();
    tracing::debug!(events = events.len(), plays = plays.len(), "Reconstructed card plays");
    plays
}

/// Drop plays whose target is not a tracked player.
pub fn retain_player_targets(plays: Vec<CardPlay>, actors: &ActorList) -> Vec<CardPlay> {
    plays
        .into_iter()
        .filter(|play| {
            let keep = actors.is_player(play.target_id);
            if !keep {
                tracing::warn!(
                    card = play.name,
                    target = play.target_id,
                    start = play.start,
                    "Discarding card played on a non-player target"
                );
            }
            keep
        })
        .collect()
}
