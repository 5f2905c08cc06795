//----------------------------------------
// simulation mod types
//----------------------------------------
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::curve::error::CurveError;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::hypothesis::error::HypothesisError;
use crate::sampling::error::SamplingError;
use crate::sampling::types::ArmData;
use crate::simulation::error::SimulationError;

/// Where each replicate's two arms come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Exponential event times; treatment hazard is base_hazard * hazard_ratio
    Exponential { base_hazard: f64, hazard_ratio: f64 },
    /// Bootstrap from observed trial arms
    Resample { control: ArmData, treatment: ArmData },
    /// Inverse-CDF draws from a control curve; treatment is the curve
    /// raised to hazard_ratio
    Curve {
        control: KaplanMeierCurve,
        hazard_ratio: f64,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PValueMethod {
    #[default]
    LogRank,
    /// Likelihood-ratio permutation test with `count` relabellings
    Permutation { count: usize },
}

/// Everything one sample-size task needs; shared read-only across tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub dataset_sim_count: usize,
    pub accrual: f64,
    pub followup: f64,
    pub treatment_fraction: f64,
    pub source: DataSource,
    pub p_value_method: PValueMethod,
    pub rmst: bool,
    pub rmst_tau: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 24601,
            dataset_sim_count: 500,
            accrual: 12.0,
            followup: 12.0,
            treatment_fraction: 0.5,
            source: DataSource::Exponential {
                base_hazard: 0.05,
                hazard_ratio: 0.6,
            },
            p_value_method: PValueMethod::LogRank,
            rmst: false,
            rmst_tau: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CtsurvErr> {
        if self.dataset_sim_count == 0 {
            return Err(SimulationError::NoReplicates.into());
        }
        if !(self.treatment_fraction > 0.0 && self.treatment_fraction < 1.0) {
            return Err(SimulationError::TreatmentFraction(self.treatment_fraction).into());
        }
        let valid_window = |x: f64| x.is_finite() && x >= 0.0;
        if !(valid_window(self.accrual) && valid_window(self.followup)) {
            return Err(SamplingError::InvalidWindow {
                accrual: self.accrual,
                followup: self.followup,
            }
            .into());
        }
        if let PValueMethod::Permutation { count: 0 } = self.p_value_method {
            return Err(HypothesisError::NoPermutations.into());
        }
        if let Some(tau) = self.rmst_tau {
            if !(tau >= 0.0) {
                return Err(HypothesisError::InvalidTau(tau).into());
            }
        }

        match &self.source {
            DataSource::Exponential {
                base_hazard,
                hazard_ratio,
            } => {
                let rate = base_hazard * hazard_ratio;
                for hazard in [*base_hazard, rate] {
                    if !(hazard.is_finite() && hazard > 0.0) {
                        return Err(SamplingError::InvalidHazard(hazard).into());
                    }
                }
            }
            DataSource::Resample { control, treatment } => {
                control.validate()?;
                treatment.validate()?;
            }
            DataSource::Curve { hazard_ratio, .. } => {
                if !(hazard_ratio.is_finite() && *hazard_ratio > 0.0) {
                    return Err(CurveError::InvalidHazardRatio(*hazard_ratio).into());
                }
            }
        }
        Ok(())
    }

    /// (control, treatment) arm sizes for a total sample size
    pub fn arm_sizes(&self, sample_size: usize) -> Result<(usize, usize), CtsurvErr> {
        let n_treat = (sample_size as f64 * self.treatment_fraction).round() as usize;
        let n_ctrl = sample_size.saturating_sub(n_treat);
        if n_treat == 0 || n_ctrl == 0 {
            return Err(SimulationError::SampleSizeTooSmall(sample_size).into());
        }
        Ok((n_ctrl, n_treat))
    }
}

/// Raw per-replicate output for one sample size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub sample_size: usize,
    pub base_hazard_dist: Vec<f64>,
    pub treat_hazard_dist: Vec<f64>,
    pub p_value_dist: Vec<f64>,
    pub rmst_p_value_dist: Option<Vec<f64>>,
}

/// Percentile summary of a `SimulationResult`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub sample_size: usize,
    pub base_interval: (f64, f64),
    pub treat_interval: (f64, f64),
    pub pvalue_interval: Vec<f64>,
    pub rmst_pvalue_interval: Option<Vec<f64>>,
}

/// Linearly spaced candidate sample sizes, inclusive of both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeGrid {
    pub min: usize,
    pub max: usize,
    pub count: usize,
}

impl SampleSizeGrid {
    pub fn sample_sizes(&self) -> Result<Vec<usize>, CtsurvErr> {
        if self.count == 0 || self.min < 2 || self.max < self.min {
            return Err(SimulationError::InvalidGrid {
                min: self.min,
                max: self.max,
                count: self.count,
            }
            .into());
        }
        if self.count == 1 {
            return Ok(vec![self.min]);
        }
        let step = (self.max - self.min) as f64 / (self.count - 1) as f64;
        let mut sizes: Vec<usize> = (0..self.count)
            .map(|i| self.min + (i as f64 * step).round() as usize)
            .collect();
        sizes.dedup();
        Ok(sizes)
    }
}

/// Sent once per finished grid task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProgress {
    pub completed: usize,
    pub total: usize,
    pub sample_size: usize,
}

/// Cooperative cancellation shared between a coordinator and its tasks
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
