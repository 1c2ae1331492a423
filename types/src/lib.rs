//! Shared configuration and report types for cardcalc
//!
//! This crate contains serializable types that are shared between the
//! analysis engine (cardcalc-core) and whatever renders its results
//! (the CLI today, a web front-end elsewhere).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Roles & Hit Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse actor category used to decide how effective a card is on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Melee,
    Ranged,
    LimitBreak,
    Pet,
    #[default]
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl Role {
    pub const fn label(&self) -> &'static str {
        match self {
            Role::Melee => "melee",
            Role::Ranged => "ranged",
            Role::LimitBreak => "limit-break",
            Role::Pet => "pet",
            Role::NotApplicable => "n/a",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized hit classification of a single damage amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HitType {
    #[default]
    Normal,
    Direct,
    Critical,
    CriticalDirect,
    /// Damage summed from a snapshotted periodic effect
    Dot,
}

impl HitType {
    pub const ALL: [HitType; 5] = [
        HitType::Normal,
        HitType::Direct,
        HitType::Critical,
        HitType::CriticalDirect,
        HitType::Dot,
    ];

    /// Stable position of this hit type inside per-actor breakdown arrays
    pub const fn index(&self) -> usize {
        match self {
            HitType::Normal => 0,
            HitType::Direct => 1,
            HitType::Critical => 2,
            HitType::CriticalDirect => 3,
            HitType::Dot => 4,
        }
    }
}

/// Percentage of an actor's damage per hit classification (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitMix {
    pub normal: f64,
    pub direct: f64,
    pub critical: f64,
    pub critical_direct: f64,
    pub dot: f64,
}

impl HitMix {
    /// Build percentages from absolute amounts ordered like `HitType::ALL`.
    /// An all-zero breakdown yields an all-zero mix.
    pub fn from_amounts(amounts: [i64; 5]) -> Self {
        let total: i64 = amounts.iter().sum();
        if total <= 0 {
            return Self::default();
        }
        let pct = |v: i64| v as f64 * 100.0 / total as f64;
        Self {
            normal: pct(amounts[0]),
            direct: pct(amounts[1]),
            critical: pct(amounts[2]),
            critical_direct: pct(amounts[3]),
            dot: pct(amounts[4]),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Buff duration assumed when a card play is missing one of its boundaries
pub const DEFAULT_CARD_DURATION_MS: i64 = 15_000;

fn default_true() -> bool {
    true
}

/// Top-level analysis configuration (persisted as TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cards: CardConfig,
    #[serde(default)]
    pub damage: DamageConfig,
    /// Evaluate draw windows on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            cards: CardConfig::default(),
            damage: DamageConfig::default(),
            parallel: true,
        }
    }
}

/// How many alternatives to report for draw windows shorter than `below_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopKTier {
    pub below_secs: f64,
    pub count: usize,
}

/// Burst window search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Length of the hypothetical buff window
    #[serde(default = "SearchConfig::default_duration_ms")]
    pub duration_ms: i64,
    /// Distance between two evaluated offsets
    #[serde(default = "SearchConfig::default_step_ms")]
    pub step_ms: i64,
    /// Same-actor candidates closer than this are treated as one burst
    #[serde(default = "SearchConfig::default_dedup_radius_ms")]
    pub dedup_radius_ms: i64,
    /// Ascending by `below_secs`
    #[serde(default = "SearchConfig::default_tiers")]
    pub tiers: Vec<TopKTier>,
    /// Count used when the draw window outlasts every tier
    #[serde(default = "SearchConfig::default_max_count")]
    pub max_count: usize,
}

impl SearchConfig {
    fn default_duration_ms() -> i64 {
        15_000
    }
    fn default_step_ms() -> i64 {
        1_000
    }
    fn default_dedup_radius_ms() -> i64 {
        4_000
    }
    fn default_tiers() -> Vec<TopKTier> {
        vec![
            TopKTier { below_secs: 4.0, count: 2 },
            TopKTier { below_secs: 10.0, count: 4 },
            TopKTier { below_secs: 20.0, count: 6 },
        ]
    }
    fn default_max_count() -> usize {
        8
    }

    /// Number of alternatives to keep per role for a draw window of the given length.
    pub fn count_for(&self, window_secs: f64) -> usize {
        self.tiers
            .iter()
            .find(|tier| window_secs < tier.below_secs)
            .map(|tier| tier.count)
            .unwrap_or(self.max_count)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::default_duration_ms(),
            step_ms: Self::default_step_ms(),
            dedup_radius_ms: Self::default_dedup_radius_ms(),
            tiers: Self::default_tiers(),
            max_count: Self::default_max_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "CardConfig::default_duration_ms")]
    pub default_duration_ms: i64,
}

impl CardConfig {
    fn default_duration_ms() -> i64 {
        DEFAULT_CARD_DURATION_MS
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_CARD_DURATION_MS,
        }
    }
}

/// Damage stream handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageConfig {
    /// Abilities whose damage is credited to the event's support actor
    #[serde(default = "DamageConfig::default_support_redirect")]
    pub support_redirect_abilities: Vec<i64>,
    /// Debuffs that never deal damage; their lifecycle events are skipped
    #[serde(default = "DamageConfig::default_ignored_lifecycle")]
    pub ignored_lifecycle_abilities: Vec<i64>,
}

impl DamageConfig {
    fn default_support_redirect() -> Vec<i64> {
        vec![799]
    }
    fn default_ignored_lifecycle() -> Vec<i64> {
        vec![1000493, 1001203, 1001195, 1001221]
    }
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            support_redirect_abilities: Self::default_support_redirect(),
            ignored_lifecycle_abilities: Self::default_ignored_lifecycle(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Results
// ─────────────────────────────────────────────────────────────────────────────

/// Complete result of analysing one fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightAnalysis {
    pub encounter: EncounterInfo,
    pub actors: Vec<ActorSummary>,
    pub windows: Vec<DrawWindowReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterInfo {
    pub report: String,
    pub fight_id: u32,
    pub name: String,
    /// Fight length as `MM:SS.mmm`
    pub duration: String,
    pub kill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub role: Role,
    /// Owning player for pets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

/// One interval between successive draws, with the card played in it and
/// the best alternative timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawWindowReport {
    /// 1-based position in the fight
    pub index: usize,
    pub start: i64,
    pub end: i64,
    pub start_time: String,
    pub end_time: String,
    pub start_event: String,
    pub end_event: String,
    pub source_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_card: Option<String>,
    pub redraws: u32,
    pub card: Option<CardPlayReport>,
    pub melee: RoleTimings,
    pub ranged: RoleTimings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPlayReport {
    pub card_id: i64,
    pub card_name: String,
    pub card_role: Role,
    pub source_id: i64,
    pub target_id: i64,
    pub start: i64,
    pub end: i64,
    pub cast_time: i64,
    pub play_time: String,
    pub duration_secs: f64,
    /// Sorted by adjusted damage, highest first
    pub damage_table: Vec<CardDamageRow>,
    pub optimal_target: Option<i64>,
    pub optimal_target_name: Option<String>,
    pub correct: bool,
    pub correct_role: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDamageRow {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub role: Role,
    pub real_damage: i64,
    pub adjusted_damage: i64,
    pub bonus_damage: i64,
    pub has_card: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_card_remaining_ms: Option<i64>,
    pub hit_mix: HitMix,
}

/// Alternative play timings for one role bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleTimings {
    pub entries: Vec<TimingEntry>,
    pub best: Option<TimingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub rank: usize,
    pub timestamp: i64,
    /// Fight-relative `MM:SS`
    pub time: String,
    pub actor_id: i64,
    pub actor_name: String,
    pub damage: i64,
}
