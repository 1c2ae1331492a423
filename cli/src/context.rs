use cardcalc_core::{AnalysisConfig, AnalysisConfigExt, FightAnalysis, FightDump};
use std::path::PathBuf;

/// Holds all state for the CLI session.
pub struct CliContext {
    pub config: AnalysisConfig,
    /// The loaded fight dump and the file it came from. None until `load` runs.
    pub dump: Option<(PathBuf, FightDump)>,
    /// Result of the most recent analysis of the loaded dump
    pub last_analysis: Option<FightAnalysis>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::load())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            dump: None,
            last_analysis: None,
        }
    }

    pub fn set_dump(&mut self, path: PathBuf, dump: FightDump) {
        self.dump = Some((path, dump));
        self.last_analysis = None;
    }

    pub fn dump(&self) -> Result<&FightDump, String> {
        self.dump
            .as_ref()
            .map(|(_, dump)| dump)
            .ok_or_else(|| "no fight loaded, use `load --path <file>` first".to_string())
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
