use log::debug;

use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::mixture::error::MixtureError;
use crate::mixture::types::MixtureModel;

/// Damping applied to each Newton step
pub const GRADIENT_SCALING: f64 = 0.1;
/// Mean absolute mixture residual at which the fit is accepted
pub const TOLERANCE: f64 = 1e-3;
pub const MAX_ITERATIONS: usize = 100;

/// Pointwise residual sum_i p_i S_fit(t)^r_i - S_obs(t)
pub fn mixture_error(
    model: &MixtureModel,
    fitted: &[f64],
    observed: &[f64],
) -> Result<Vec<f64>, CtsurvErr> {
    model.validate()?;
    if fitted.len() != observed.len() {
        return Err(MixtureError::CurveLengths {
            fitted: fitted.len(),
            observed: observed.len(),
        }
        .into());
    }
    Ok(fitted
        .iter()
        .zip(observed)
        .map(|(s, obs)| model.mix(*s) - obs)
        .collect())
}

/// Pointwise derivative of the mixture with respect to S_fit(t)
pub fn mixture_derivative(model: &MixtureModel, fitted: &[f64]) -> Result<Vec<f64>, CtsurvErr> {
    model.validate()?;
    Ok(fitted.iter().map(|s| model.mix_slope(*s)).collect())
}

/// Recovers the reference-subgroup curve S_ref from an observed mixture
/// curve, i.e. solves sum_i p_i S_ref(t)^r_i = S_obs(t) at every time point.
///
/// Starts from S_obs and takes damped Newton steps, clamped to [0, 1],
/// until the mean absolute residual drops below `TOLERANCE`. The returned
/// curve shares the observed curve's time grid.
pub fn fit_reference_survival(
    model: &MixtureModel,
    observed: &KaplanMeierCurve,
) -> Result<KaplanMeierCurve, CtsurvErr> {
    model.validate()?;
    let target = observed.probability();
    let mut fitted = target.to_vec();

    let mut mean_abs_error = f64::INFINITY;
    for iteration in 0..MAX_ITERATIONS {
        let error = mixture_error(model, &fitted, target)?;
        let derivative = mixture_derivative(model, &fitted)?;

        for ((s, e), d) in fitted.iter_mut().zip(&error).zip(&derivative) {
            // A flat mixture gives no direction to move in
            if *d == 0.0 {
                continue;
            }
            *s = (*s - GRADIENT_SCALING * e / d).clamp(0.0, 1.0);
        }

        mean_abs_error = error.iter().map(|e| e.abs()).sum::<f64>() / error.len() as f64;
        if mean_abs_error < TOLERANCE {
            debug!(
                "reference curve converged after {} iterations (mean abs error {:.2e})",
                iteration + 1,
                mean_abs_error
            );
            return observed.with_probability(fitted);
        }
    }

    Err(MixtureError::FailedToConverge {
        iterations: MAX_ITERATIONS,
        mean_abs_error,
    }
    .into())
}
