use crate::error::CtsurvErr;
use crate::parametric::error::ParametricError;

/// Weibull survival S(t) = exp(-(t / scale)^shape) at each time
pub fn evaluate_weibull(times: &[f64], scale: f64, shape: f64) -> Result<Vec<f64>, CtsurvErr> {
    if !(scale > 0.0 && shape > 0.0) {
        return Err(ParametricError::InvalidWeibull { scale, shape }.into());
    }
    Ok(times
        .iter()
        .map(|t| (-(t / scale).powf(shape)).exp())
        .collect())
}
