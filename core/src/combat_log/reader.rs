use memmap2::Mmap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{DamageStreams, InputError, RawEvent, ReportData};
use crate::actors::{Pet, Player};

/// Everything the log service returned for one fight, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightDump {
    pub report: ReportData,
    pub fight_id: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub pets: Vec<Pet>,
    #[serde(default)]
    pub card_events: Vec<RawEvent>,
    #[serde(default)]
    pub draw_events: Vec<RawEvent>,
    #[serde(default)]
    pub damage: DamageStreams,
}

impl FightDump {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn event_count(&self) -> usize {
        self.card_events.len()
            + self.draw_events.len()
            + self.damage.raw.len()
            + self.damage.tick.len()
            + self.damage.debuffs.len()
            + self.damage.ground.len()
    }
}

/// Load a fight dump. Dumps of long fights run to tens of megabytes, so the
/// file is memory mapped rather than read into a buffer first.
pub fn read_fight_dump(path: &Path) -> Result<FightDump, InputError> {
    let file = fs::File::open(path).map_err(|source| InputError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| InputError::MemoryMap {
        path: path.to_path_buf(),
        source,
    })?;

    let dump = FightDump::from_slice(mmap.as_ref()).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        fight_id = dump.fight_id,
        events = dump.event_count(),
        "Loaded fight dump"
    );
    Ok(dump)
}
