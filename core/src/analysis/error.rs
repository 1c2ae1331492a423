//! Error types for fight analysis

use thiserror::Error;

/// Domain failures that end a single analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no card plays found in fight {fight_id}")]
    NoCardPlays { fight_id: u32 },

    #[error("no draw events found in fight {fight_id}")]
    NoDrawEvents { fight_id: u32 },

    #[error("fight {fight_id} not found in report {report}")]
    FightNotFound { report: String, fight_id: u32 },
}
