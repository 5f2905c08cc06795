//----------------------------------------
// simulation errors
//----------------------------------------
use crate::error::CtsurvErr;
use itertools::Itertools;
use thiserror::Error;

/// A grid task that did not produce a result
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFailure {
    pub sample_size: usize,
    pub message: String,
}

fn describe(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("n = {}: {}", f.sample_size, f.message))
        .join("; ")
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("sample size {0} is too small to fill both arms")]
    SampleSizeTooSmall(usize),
    #[error("number of simulated datasets should be positive")]
    NoReplicates,
    #[error("treatment fraction should be in (0, 1); got {0}")]
    TreatmentFraction(f64),
    #[error("percentiles should be in [0, 100]; got {0}")]
    PercentileOutOfBounds(f64),
    #[error("cannot take percentiles of an empty distribution")]
    EmptyDistribution,
    #[error("invalid sample-size grid (min {min}, max {max}, count {count})")]
    InvalidGrid { min: usize, max: usize, count: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("simulation was cancelled")]
    Cancelled,
    #[error("{} simulation task(s) failed: {}", .0.len(), describe(.0))]
    TasksFailed(Vec<TaskFailure>),
}

impl From<SimulationError> for CtsurvErr {
    fn from(err: SimulationError) -> CtsurvErr {
        CtsurvErr::Simulation(err)
    }
}
