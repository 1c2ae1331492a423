use cardcalc_types::HitType;
use serde::Deserialize;

use crate::actors::ActorId;

/// Event type strings emitted by the log service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEventType {
    ApplyBuff,
    ApplyBuffStack,
    ApplyDebuff,
    ApplyDebuffStack,
    RefreshBuff,
    RefreshDebuff,
    RemoveBuff,
    RemoveBuffStack,
    RemoveDebuff,
    RemoveDebuffStack,
    Damage,
    Cast,
    #[serde(other)]
    Other,
}

/// Nested actor object some events carry instead of a flat `sourceID`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawActorRef {
    pub id: ActorId,
}

/// One event exactly as delivered by the log service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub event_type: RawEventType,
    #[serde(rename = "sourceID", default)]
    pub source_id: Option<ActorId>,
    #[serde(default)]
    pub source: Option<RawActorRef>,
    #[serde(rename = "targetID", default)]
    pub target_id: Option<ActorId>,
    #[serde(rename = "abilityGameID", default)]
    pub ability_id: i64,
    #[serde(default)]
    pub amount: Option<i64>,
    /// 1 = regular hit, 2 = critical hit
    #[serde(default)]
    pub hit_type: Option<u8>,
    #[serde(default)]
    pub direct_hit: Option<bool>,
    #[serde(rename = "supportID", default)]
    pub support_id: Option<ActorId>,
}

impl RawEvent {
    /// Source id, falling back to the nested source object.
    pub fn resolved_source(&self) -> Option<ActorId> {
        self.source_id.or(self.source.map(|s| s.id))
    }
}

/// Normalized event kind. Damage carries its amount and classified hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    ApplyBuff,
    RefreshBuff,
    ApplyDebuff,
    RefreshDebuff,
    RemoveBuff,
    RemoveDebuff,
    Damage { amount: i64, hit: HitType },
    Cast,
}

impl EventKind {
    /// Same-timestamp ordering: applications, then refreshes, then damage,
    /// then removals. Casts sort with applications.
    pub const fn priority(&self) -> u8 {
        match self {
            EventKind::ApplyBuff | EventKind::ApplyDebuff | EventKind::Cast => 1,
            EventKind::RefreshBuff | EventKind::RefreshDebuff => 2,
            EventKind::Damage { .. } => 3,
            EventKind::RemoveBuff | EventKind::RemoveDebuff => 4,
        }
    }

    /// Apply or refresh of a buff or debuff
    pub const fn is_application(&self) -> bool {
        matches!(
            self,
            EventKind::ApplyBuff
                | EventKind::RefreshBuff
                | EventKind::ApplyDebuff
                | EventKind::RefreshDebuff
        )
    }

    pub const fn is_buff_application(&self) -> bool {
        matches!(self, EventKind::ApplyBuff | EventKind::RefreshBuff)
    }

    pub const fn is_removal(&self) -> bool {
        matches!(self, EventKind::RemoveBuff | EventKind::RemoveDebuff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatEvent {
    pub timestamp: i64,
    pub source_id: ActorId,
    pub target_id: ActorId,
    pub ability_id: i64,
    pub kind: EventKind,
}

impl CombatEvent {
    pub fn sort_key(&self) -> (i64, u8) {
        (self.timestamp, self.kind.priority())
    }

    pub fn damage_amount(&self) -> Option<i64> {
        match self.kind {
            EventKind::Damage { amount, .. } => Some(amount),
            _ => None,
        }
    }

    /// Convert a raw event. Stack changes and unknown types are dropped, as
    /// are events with no resolvable source.
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        let kind = match raw.event_type {
            RawEventType::ApplyBuff => EventKind::ApplyBuff,
            RawEventType::ApplyDebuff => EventKind::ApplyDebuff,
            RawEventType::RefreshBuff => EventKind::RefreshBuff,
            RawEventType::RefreshDebuff => EventKind::RefreshDebuff,
            RawEventType::RemoveBuff => EventKind::RemoveBuff,
            RawEventType::RemoveDebuff => EventKind::RemoveDebuff,
            RawEventType::Cast => EventKind::Cast,
            RawEventType::Damage => EventKind::Damage {
                amount: raw.amount.unwrap_or_default(),
                hit: classify_hit(raw.hit_type, raw.direct_hit),
            },
            RawEventType::ApplyBuffStack
            | RawEventType::ApplyDebuffStack
            | RawEventType::RemoveBuffStack
            | RawEventType::RemoveDebuffStack
            | RawEventType::Other => return None,
        };

        Some(Self {
            timestamp: raw.timestamp,
            source_id: raw.resolved_source()?,
            target_id: raw.target_id.unwrap_or_default(),
            ability_id: raw.ability_id,
            kind,
        })
    }
}

/// Classify a direct damage hit. Missing fields mean a regular, non-direct hit.
pub fn classify_hit(hit_type: Option<u8>, direct_hit: Option<bool>) -> HitType {
    match (hit_type.unwrap_or(1), direct_hit.unwrap_or(false)) {
        (2, false) => HitType::Critical,
        (2, true) => HitType::CriticalDirect,
        (_, true) => HitType::Direct,
        (_, false) => HitType::Normal,
    }
}
