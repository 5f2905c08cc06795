//----------------------------------------
// sampling errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("event hazard should be finite and positive; got {0}")]
    InvalidHazard(f64),
    #[error(
        "accrual and follow-up should be finite and non-negative; got accrual {accrual}, \
        follow-up {followup}"
    )]
    InvalidWindow { accrual: f64, followup: f64 },
    #[error("cannot resample from an empty pool of observations")]
    EmptyPool,
    #[error(
        "lengths of arm {arm_name} times and events don't match (times length {times}, \
        events length {events})"
    )]
    ArmLengths {
        arm_name: String,
        times: usize,
        events: usize,
    },
}

impl From<SamplingError> for CtsurvErr {
    fn from(err: SamplingError) -> CtsurvErr {
        CtsurvErr::Sampling(err)
    }
}
