use hashbrown::{HashMap, HashSet};

use crate::actors::ActorId;
use crate::combat_log::{CombatEvent, EventKind};

/// Lump-sum damage of one periodic effect, credited to the moment it was
/// (re)applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotEvent {
    pub source_id: ActorId,
    pub target_id: ActorId,
    pub ability_id: i64,
    pub timestamp: i64,
    pub amount: i64,
}

type EffectKey = (ActorId, ActorId, i64);

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    anchor: i64,
    amount: i64,
    /// Opened by a tick under a ground effect rather than a direct application
    ground: bool,
}

impl Accumulator {
    fn open(anchor: i64) -> Self {
        Self {
            anchor,
            amount: 0,
            ground: false,
        }
    }
}

/// Latest placement of a ground effect and the targets it has ticked on.
#[derive(Debug, Clone, Default)]
struct GroundPlacement {
    placed_at: i64,
    targets: HashSet<ActorId>,
}

/// Single forward pass state for snapshot aggregation.
#[derive(Debug, Default)]
struct SnapshotAggregator {
    open: HashMap<EffectKey, Accumulator>,
    ground: HashMap<(ActorId, i64), GroundPlacement>,
    output: Vec<SnapshotEvent>,
}

impl SnapshotAggregator {
    /// Zero-amount accumulators carry no damage and are dropped.
    fn emit(&mut self, (source_id, target_id, ability_id): EffectKey, acc: Accumulator) {
        if acc.amount == 0 {
            return;
        }
        self.output.push(SnapshotEvent {
            source_id,
            target_id,
            ability_id,
            timestamp: acc.anchor,
            amount: acc.amount,
        });
    }

    fn apply(&mut self, event: &CombatEvent) {
        let key = (event.source_id, event.target_id, event.ability_id);
        if let Some(previous) = self.open.insert(key, Accumulator::open(event.timestamp)) {
            self.emit(key, previous);
        }

        if event.kind.is_buff_application() {
            self.place_ground(event.source_id, event.ability_id, event.timestamp);
        }
    }

    /// A new placement supersedes every accumulator opened by the previous one.
    fn place_ground(&mut self, source_id: ActorId, ability_id: i64, timestamp: i64) {
        let placement = GroundPlacement {
            placed_at: timestamp,
            targets: HashSet::new(),
        };
        let Some(previous) = self.ground.insert((source_id, ability_id), placement) else {
            return;
        };

        for target_id in previous.targets {
            let key = (source_id, target_id, ability_id);
            // A direct application may have replaced the ground accumulator
            if self.open.get(&key).is_some_and(|acc| acc.ground)
                && let Some(acc) = self.open.remove(&key)
            {
                self.emit(key, acc);
            }
        }
    }

    fn tick(&mut self, event: &CombatEvent, amount: i64) {
        let key = (event.source_id, event.target_id, event.ability_id);
        if let Some(acc) = self.open.get_mut(&key) {
            acc.amount += amount;
            return;
        }

        if let Some(placement) = self.ground.get_mut(&(event.source_id, event.ability_id)) {
            placement.targets.insert(event.target_id);
            self.open.insert(
                key,
                Accumulator {
                    anchor: placement.placed_at,
                    amount,
                    ground: true,
                },
            );
            return;
        }

        tracing::debug!(
            source = event.source_id,
            target = event.target_id,
            ability = event.ability_id,
            timestamp = event.timestamp,
            "Tick without a prior application"
        );
        self.emit(
            key,
            Accumulator {
                anchor: event.timestamp,
                amount,
                ground: false,
            },
        );
    }

    fn finish(mut self) -> Vec<SnapshotEvent> {
        let remaining: Vec<(EffectKey, Accumulator)> = self.open.drain().collect();
        for (key, acc) in remaining {
            self.emit(key, acc);
        }

        self.output
            .sort_by_key(|s| (s.timestamp, s.source_id, s.target_id, s.ability_id));
        self.output
    }
}

/// Collapse periodic damage into snapshot events.
///
/// `periodic` must be ordered by [`CombatEvent::sort_key`] so applications
/// are seen before same-timestamp ticks. Removals never close an
/// accumulator: late ticks after a remove still belong to the last
/// application. The sum of snapshot amounts per key always equals the sum
/// of tick amounts for that key.
pub fn aggregate_snapshots(periodic: &[CombatEvent]) -> Vec<SnapshotEvent> {
    let mut aggregator = SnapshotAggregator::default();

    for event in periodic {
        match event.kind {
            kind if kind.is_application() => aggregator.apply(event),
            EventKind::Damage { amount, .. } => aggregator.tick(event, amount),
            _ => {}
        }
    }

    let snapshots = aggregator.finish();
    tracing::debug!(
        periodic = periodic.len(),
        snapshots = snapshots.len(),
        "Aggregated snapshot damage"
    );
    snapshots
}
