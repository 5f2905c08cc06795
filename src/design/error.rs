//----------------------------------------
// design errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("alpha should be in (0, 1); got {0}")]
    InvalidAlpha(f64),
    #[error("beta should be in (0, 1); got {0}")]
    InvalidBeta(f64),
    #[error("treatment proportion should be in (0, 1); got {0}")]
    InvalidProportion(f64),
    #[error("hazard ratio should be positive and different from 1; got {0}")]
    InvalidHazardRatio(f64),
    #[error("accrual and follow-up should be non-negative (accrual {accrual}, follow-up {followup})")]
    InvalidWindow { accrual: f64, followup: f64 },
    #[error("survival anchors should be in [0, 1]; got {0}")]
    AnchorOutOfBounds(f64),
    #[error("design expects no events, so no sample size reaches the event count")]
    NoEvents,
}

impl From<DesignError> for CtsurvErr {
    fn from(err: DesignError) -> CtsurvErr {
        CtsurvErr::Design(err)
    }
}
