//----------------------------------------
// curve errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurveError {
    #[error("lengths of times and events don't match (times length {times}, events length {events})")]
    ObservationLengths { times: usize, events: usize },
    #[error(
        "lengths of curve times and probabilities don't match (times length {times}, \
        probabilities length {probabilities})"
    )]
    ProbabilityLengths { times: usize, probabilities: usize },
    #[error(
        "risk-set arrays don't match curve times (times length {times}, events length \
        {events}, at-risk length {at_risk})"
    )]
    CountLengths {
        times: usize,
        events: usize,
        at_risk: usize,
    },
    #[error("interval length {intervals} doesn't match curve length {times}")]
    IntervalLength { times: usize, intervals: usize },
    #[error("curve must contain at least one point")]
    Empty,
    #[error("times must be non-negative; got {value} at index {index}")]
    NegativeTime { index: usize, value: f64 },
    #[error("curve times must be strictly increasing; violated at index {0}")]
    TimesNotIncreasing(usize),
    #[error("survival probabilities should be in [0, 1]; got {value} at index {index}")]
    ProbabilityOutOfBounds { index: usize, value: f64 },
    #[error("hazard ratio should be finite and positive; got {0}")]
    InvalidHazardRatio(f64),
}

impl From<CurveError> for CtsurvErr {
    fn from(err: CurveError) -> CtsurvErr {
        CtsurvErr::Curve(err)
    }
}
