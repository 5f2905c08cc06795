//----------------------------------------
// hypothesis errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HypothesisError {
    #[error(
        "lengths of {arm} times and events don't match (times length {times}, \
        events length {events})"
    )]
    ArmLengths {
        arm: &'static str,
        times: usize,
        events: usize,
    },
    #[error("restriction time tau should be non-negative; got {0}")]
    InvalidTau(f64),
    #[error("RMST variance needs events and at-risk counts aligned with the curve")]
    MissingRiskSets,
    #[error("permutation count should be positive")]
    NoPermutations,
}

impl From<HypothesisError> for CtsurvErr {
    fn from(err: HypothesisError) -> CtsurvErr {
        CtsurvErr::Hypothesis(err)
    }
}

pub(crate) fn check_arm(arm: &'static str, times: &[f64], events: &[bool]) -> Result<(), CtsurvErr> {
    if times.len() != events.len() {
        return Err(HypothesisError::ArmLengths {
            arm,
            times: times.len(),
            events: events.len(),
        }
        .into());
    }
    Ok(())
}
