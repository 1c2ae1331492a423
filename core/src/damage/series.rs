use cardcalc_types::HitType;

use super::SnapshotEvent;
use crate::actors::ActorId;
use crate::combat_log::{CombatEvent, EventKind};

/// A single attributable damage amount. Snapshot damage carries `HitType::Dot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub timestamp: i64,
    pub source_id: ActorId,
    pub target_id: ActorId,
    pub ability_id: i64,
    pub amount: i64,
    pub hit: HitType,
}

impl From<&SnapshotEvent> for DamageEvent {
    fn from(snapshot: &SnapshotEvent) -> Self {
        Self {
            timestamp: snapshot.timestamp,
            source_id: snapshot.source_id,
            target_id: snapshot.target_id,
            ability_id: snapshot.ability_id,
            amount: snapshot.amount,
            hit: HitType::Dot,
        }
    }
}

/// Damage events ordered by timestamp. Timestamps never change after
/// construction, so the ordering holds for the lifetime of the series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageSeries {
    events: Vec<DamageEvent>,
}

impl DamageSeries {
    pub fn new(mut events: Vec<DamageEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self { events }
    }

    /// Merge snapshot damage with instant damage events.
    pub fn from_parts(snapshots: &[SnapshotEvent], instant: &[CombatEvent]) -> Self {
        let instant = instant.iter().filter_map(|event| match event.kind {
            EventKind::Damage { amount, hit } => Some(DamageEvent {
                timestamp: event.timestamp,
                source_id: event.source_id,
                target_id: event.target_id,
                ability_id: event.ability_id,
                amount,
                hit,
            }),
            _ => None,
        });

        Self::new(snapshots.iter().map(DamageEvent::from).chain(instant).collect())
    }

    pub fn events(&self) -> &[DamageEvent] {
        &self.events
    }

    /// Events with `start <= timestamp < end`
    pub fn range(&self, start: i64, end: i64) -> &[DamageEvent] {
        let lo = self.lower_bound(start);
        let hi = self.lower_bound(end).max(lo);
        &self.events[lo..hi]
    }

    /// Events with `start <= timestamp <= end`
    pub(crate) fn range_inclusive_mut(&mut self, start: i64, end: i64) -> &mut [DamageEvent] {
        let lo = self.lower_bound(start);
        let hi = self.events.partition_point(|e| e.timestamp <= end).max(lo);
        &mut self.events[lo..hi]
    }

    /// Index of the first event at or after `timestamp`
    pub fn lower_bound(&self, timestamp: i64) -> usize {
        self.events.partition_point(|e| e.timestamp < timestamp)
    }

    pub fn total(&self) -> i64 {
        self.events.iter().map(|e| e.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
