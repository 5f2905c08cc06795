use std::f64::consts::LN_2;

use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::parametric::error::ParametricError;
use crate::parametric::types::SurvivalPoint;

/// Least-squares exponential rate for ln S(t) = -lambda * t (no intercept):
/// lambda = -sum(t ln S) / sum(t^2).
///
/// Points with S <= 0 carry no usable log-survival and are skipped. When
/// nothing informative remains (all times 0, or no drop below 1) the rate
/// is 0.
pub fn fit_exponential(points: &[SurvivalPoint]) -> f64 {
    let (numerator, denominator) = points
        .iter()
        .filter(|p| p.surv_prob > 0.0)
        .fold((0.0, 0.0), |(num, den), p| {
            (num - p.time * p.surv_prob.ln(), den + p.time * p.time)
        });
    if denominator == 0.0 || numerator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

fn check_rate(lambda: f64) -> Result<(), CtsurvErr> {
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(ParametricError::InvalidRate(lambda).into());
    }
    Ok(())
}

/// S(t) = exp(-lambda * t) at each time
pub fn evaluate_exponential(times: &[f64], lambda: f64) -> Result<Vec<f64>, CtsurvErr> {
    check_rate(lambda)?;
    Ok(times.iter().map(|t| (-lambda * t).exp()).collect())
}

/// Exponential model as a curve on the given time grid, for overlays
pub fn exponential_curve(times: &[f64], lambda: f64) -> Result<KaplanMeierCurve, CtsurvErr> {
    let probability = evaluate_exponential(times, lambda)?;
    KaplanMeierCurve::new(times.to_vec(), probability)
}

pub fn median_from_lambda(lambda: f64) -> Result<f64, CtsurvErr> {
    if !(lambda.is_finite() && lambda > 0.0) {
        return Err(ParametricError::InvalidRate(lambda).into());
    }
    Ok(LN_2 / lambda)
}

/// Rate whose exponential median is `median_tte`, ln 2 / median. This is the
/// exact inverse of `median_from_lambda`, not the 1 / (median * ln 2)
/// shortcut, which gives a different rate for the same median.
pub fn lambda_from_median(median_tte: f64) -> Result<f64, CtsurvErr> {
    if !(median_tte.is_finite() && median_tte > 0.0) {
        return Err(ParametricError::InvalidMedian(median_tte).into());
    }
    Ok(LN_2 / median_tte)
}
