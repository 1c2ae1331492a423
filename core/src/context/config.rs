//! Analysis configuration persistence
//!
//! The configuration types live in cardcalc-types; this module stores them
//! as TOML through confy.

use std::path::{Path, PathBuf};

pub use cardcalc_types::AnalysisConfig;

use super::ConfigError;

pub const APP_NAME: &str = "cardcalc";
pub const CONFIG_NAME: &str = "config";

/// Extension trait for AnalysisConfig persistence
pub trait AnalysisConfigExt: Sized {
    /// Load the stored configuration, falling back to defaults
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AnalysisConfigExt for AnalysisConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Using default analysis configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_reads_partial_file() {
        let dir = std::env::temp_dir().join(format!("cardcalc-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("partial.toml");
        std::fs::write(&path, "parallel = false\n\n[search]\nstep_ms = 250\n").unwrap();

        let config = AnalysisConfig::load_from(&path).unwrap();

        assert!(!config.parallel);
        assert_eq!(config.search.step_ms, 250);
        assert_eq!(config.search.duration_ms, 15_000);
        assert_eq!(config.cards.default_duration_ms, 15_000);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = std::env::temp_dir().join(format!("cardcalc-config-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[search\nstep_ms = ").unwrap();

        let err = AnalysisConfig::load_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::LoadPath { .. }));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
