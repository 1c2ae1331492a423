mod combat_event;
mod error;
mod normalizer;
mod reader;
mod report;

pub use combat_event::*;
pub use error::InputError;
pub use normalizer::{DamageStreams, NormalizedDamage, normalize_damage, normalize_events};
pub use reader::{FightDump, read_fight_dump};
pub use report::{
    FightInfo, FightSelector, FightSummary, ReportData, format_offset, parse_report_url,
};
