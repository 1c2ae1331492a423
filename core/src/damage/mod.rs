//! Damage attribution pipeline
//!
//! ```text
//!  periodic events ──► snapshot aggregation ──┐
//!                                             ├──► DamageSeries ──► attribution
//!  instant damage ────────────────────────────┘          │
//!                                                        ▼
//!                                           card bonus correction
//!                                                        │
//!                                                        ▼
//!                                              burst window search
//! ```

mod attribution;
mod correction;
mod search;
mod series;
mod snapshot;

#[cfg(test)]
mod attribution_tests;
#[cfg(test)]
mod search_tests;

pub use attribution::{Attribution, HitBreakdown, attribute};
pub use correction::{effective_bonus, remove_card_bonus, without_bonus};
pub use search::{DamageSurface, SearchWindow, TimingCandidate, search_burst_window, top_candidates};
pub use series::{DamageEvent, DamageSeries};
pub use snapshot::{SnapshotEvent, aggregate_snapshots};
