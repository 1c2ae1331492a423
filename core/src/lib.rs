pub mod actors;
pub mod analysis;
pub mod combat_log;
pub mod context;
pub mod damage;
pub mod game_data;
pub mod windows;

// Re-exports for convenience
pub use actors::{ActorId, ActorList, Pet, Player};
pub use analysis::{AnalysisError, FightInput, analyze, analyze_dump};
pub use cardcalc_types::*;
pub use combat_log::{
    FightDump, FightInfo, FightSelector, InputError, ReportData, parse_report_url, read_fight_dump,
};
pub use context::{AnalysisConfigExt, ConfigError};
