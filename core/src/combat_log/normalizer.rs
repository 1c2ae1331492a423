//! Merges the raw damage sub-streams into time-ordered normalized events.

use cardcalc_types::DamageConfig;
use serde::Deserialize;

use super::{CombatEvent, EventKind, RawEvent, RawEventType};

#[cfg(test)]
mod tests;

/// Damage-related sub-streams as fetched from the log service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DamageStreams {
    /// Instant (non-tick) damage
    pub raw: Vec<RawEvent>,
    /// Periodic tick damage
    pub tick: Vec<RawEvent>,
    /// Enemy debuff lifecycle (apply/refresh/remove)
    pub debuffs: Vec<RawEvent>,
    /// Buff lifecycle of ground-placed damage effects
    pub ground: Vec<RawEvent>,
}

/// Normalized damage input for snapshot aggregation and attribution
#[derive(Debug, Clone, Default)]
pub struct NormalizedDamage {
    /// Instant damage events, ordered by timestamp
    pub instant: Vec<CombatEvent>,
    /// Tick damage merged with effect lifecycle, ordered by (timestamp, priority)
    pub periodic: Vec<CombatEvent>,
}

pub fn normalize_damage(streams: &DamageStreams, config: &DamageConfig) -> NormalizedDamage {
    let mut instant: Vec<CombatEvent> = streams
        .raw
        .iter()
        .filter(|raw| raw.event_type == RawEventType::Damage)
        .filter_map(|raw| to_damage_event(raw, config))
        .collect();
    instant.sort_by_key(CombatEvent::sort_key);

    let ticks = streams
        .tick
        .iter()
        .filter(|raw| raw.event_type == RawEventType::Damage)
        .filter_map(|raw| to_damage_event(raw, config));

    let lifecycle = streams
        .debuffs
        .iter()
        .chain(streams.ground.iter())
        .filter(|raw| !config.ignored_lifecycle_abilities.contains(&raw.ability_id))
        .filter_map(CombatEvent::from_raw)
        .filter(|event| event.kind.is_application() || event.kind.is_removal());

    let mut periodic: Vec<CombatEvent> = ticks.chain(lifecycle).collect();
    periodic.sort_by_key(CombatEvent::sort_key);

    tracing::debug!(
        instant = instant.len(),
        periodic = periodic.len(),
        "Normalized damage streams"
    );

    NormalizedDamage { instant, periodic }
}

/// Normalize a card or draw stream: convert and order by (timestamp, priority).
pub fn normalize_events(raw: &[RawEvent]) -> Vec<CombatEvent> {
    let mut events: Vec<CombatEvent> = raw.iter().filter_map(CombatEvent::from_raw).collect();
    events.sort_by_key(CombatEvent::sort_key);
    events
}

fn to_damage_event(raw: &RawEvent, config: &DamageConfig) -> Option<CombatEvent> {
    let mut event = CombatEvent::from_raw(raw)?;
    debug_assert!(matches!(event.kind, EventKind::Damage { .. }));

    // Some area damage is logged against the actor that enabled it
    if config.support_redirect_abilities.contains(&event.ability_id)
        && let Some(support) = raw.support_id
    {
        event.source_id = support;
    }
    Some(event)
}
