mod config;
mod error;

pub use config::{APP_NAME, AnalysisConfigExt, CONFIG_NAME};
pub use error::ConfigError;
