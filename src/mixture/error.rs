//----------------------------------------
// mixture errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixtureError {
    #[error("at least two subgroups are required; got {0}")]
    TooFewSubgroups(usize),
    #[error(
        "lengths of proportions and hazard ratios don't match (proportions length \
        {proportions}, hazard ratios length {hazard_ratios})"
    )]
    ProportionRatioLengths {
        proportions: usize,
        hazard_ratios: usize,
    },
    #[error("first hazard ratio is the reference subgroup and must be 1; got {0}")]
    ReferenceRatio(f64),
    #[error("hazard ratios should be finite and positive; got {0}")]
    InvalidHazardRatio(f64),
    #[error("fitted and observed curves differ in length ({fitted} vs {observed})")]
    CurveLengths { fitted: usize, observed: usize },
    #[error(
        "failed to converge after {iterations} iterations (mean absolute error \
        {mean_abs_error})"
    )]
    FailedToConverge {
        iterations: usize,
        mean_abs_error: f64,
    },
}

impl From<MixtureError> for CtsurvErr {
    fn from(err: MixtureError) -> CtsurvErr {
        CtsurvErr::Mixture(err)
    }
}
