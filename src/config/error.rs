//----------------------------------------
// config errors
//----------------------------------------
use std::path::PathBuf;

use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse study TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("alpha should be in (0, 1); got {0}")]
    InvalidAlpha(f64),
    #[error("at least one p-value percentile is required")]
    NoPercentiles,
    #[error("target percentile index {index} is out of range for {count} p-value percentile(s)")]
    TargetPercentile { index: usize, count: usize },
    #[error("thread count should be positive")]
    ZeroThreads,
}

impl From<ConfigError> for CtsurvErr {
    fn from(err: ConfigError) -> CtsurvErr {
        CtsurvErr::Config(err)
    }
}
