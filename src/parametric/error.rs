//----------------------------------------
// parametric errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParametricError {
    #[error("exponential rate should be finite and non-negative; got {0}")]
    InvalidRate(f64),
    #[error("median time-to-event should be finite and positive; got {0}")]
    InvalidMedian(f64),
    #[error("Weibull scale and shape should be positive; got scale {scale}, shape {shape}")]
    InvalidWeibull { scale: f64, shape: f64 },
}

impl From<ParametricError> for CtsurvErr {
    fn from(err: ParametricError) -> CtsurvErr {
        CtsurvErr::Parametric(err)
    }
}
