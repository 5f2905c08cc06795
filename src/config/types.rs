//----------------------------------------
// config mod types
//----------------------------------------
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::error::CtsurvErr;
use crate::simulation::error::SimulationError;
use crate::simulation::types::{SampleSizeGrid, SimulationConfig};

/// How grid results are reduced into a power curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub alpha: f64,
    /// Percentiles (0-100) taken of each p-value distribution
    pub pvalue_percentiles: Vec<f64>,
    /// Index into `pvalue_percentiles` used for the minimum sample size
    pub target_percentile: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            pvalue_percentiles: vec![80.0, 90.0],
            target_percentile: 0,
        }
    }
}

/// A complete study: one simulation setup swept over a sample-size grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub grid: SampleSizeGrid,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub threads: Option<usize>,
}

impl StudyConfig {
    /// Parses and validates a study from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CtsurvErr> {
        let study: StudyConfig = toml::from_str(text).map_err(ConfigError::from)?;
        study.validate()?;
        Ok(study)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CtsurvErr> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), CtsurvErr> {
        self.simulation.validate()?;
        self.grid.sample_sizes()?;

        let report = &self.report;
        if !(report.alpha > 0.0 && report.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(report.alpha).into());
        }
        if report.pvalue_percentiles.is_empty() {
            return Err(ConfigError::NoPercentiles.into());
        }
        if let Some(&p) = report
            .pvalue_percentiles
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            return Err(SimulationError::PercentileOutOfBounds(p).into());
        }
        if report.target_percentile >= report.pvalue_percentiles.len() {
            return Err(ConfigError::TargetPercentile {
                index: report.target_percentile,
                count: report.pvalue_percentiles.len(),
            }
            .into());
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads.into());
        }
        Ok(())
    }
}
