use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Exp;

use crate::error::CtsurvErr;
use crate::sampling::error::SamplingError;
use crate::sampling::types::SampledArm;

fn check_window(accrual: f64, followup: f64) -> Result<(), CtsurvErr> {
    let valid = |x: f64| x.is_finite() && x >= 0.0;
    if !(valid(accrual) && valid(followup)) {
        return Err(SamplingError::InvalidWindow { accrual, followup }.into());
    }
    Ok(())
}

/// Applies administrative censoring from staggered entry.
///
/// Each subject gets an enrollment offset drawn uniformly from
/// [0, accrual); the study closes at accrual + followup. A subject whose
/// enrollment-adjusted time passes study close is censored at the time
/// they had been followed by then. Censored inputs stay censored.
pub fn censor_by_enrollment<R: Rng + ?Sized>(
    times: &[f64],
    events: &[bool],
    accrual: f64,
    followup: f64,
    rng: &mut R,
) -> Result<SampledArm, CtsurvErr> {
    check_window(accrual, followup)?;
    let study_close = accrual + followup;

    let (times, events) = times
        .iter()
        .zip(events)
        .map(|(&t, &is_event)| {
            let enrollment = rng.gen::<f64>() * accrual;
            if enrollment + t > study_close {
                (study_close - enrollment, false)
            } else {
                (t, is_event)
            }
        })
        .unzip();
    Ok(SampledArm { times, events })
}

/// Fully synthetic arm: exponential event times at rate `hazard`, then
/// enrollment censoring
pub fn sample_dataset<R: Rng + ?Sized>(
    hazard: f64,
    n: usize,
    accrual: f64,
    followup: f64,
    rng: &mut R,
) -> Result<SampledArm, CtsurvErr> {
    if !(hazard.is_finite() && hazard > 0.0) {
        return Err(SamplingError::InvalidHazard(hazard).into());
    }
    let surv_exp = Exp::new(hazard).map_err(|_| SamplingError::InvalidHazard(hazard))?;
    let raw_times: Vec<f64> = (0..n).map(|_| surv_exp.sample(&mut *rng)).collect();
    censor_by_enrollment(&raw_times, &vec![true; n], accrual, followup, rng)
}

/// Bootstrap arm: draws `n` (time, event) pairs with replacement from an
/// observed pool, then applies enrollment censoring
pub fn resample_dataset<R: Rng + ?Sized>(
    pool_times: &[f64],
    pool_events: &[bool],
    n: usize,
    accrual: f64,
    followup: f64,
    rng: &mut R,
) -> Result<SampledArm, CtsurvErr> {
    if pool_times.is_empty() {
        return Err(SamplingError::EmptyPool.into());
    }
    if pool_times.len() != pool_events.len() {
        return Err(SamplingError::ArmLengths {
            arm_name: String::from("pool"),
            times: pool_times.len(),
            events: pool_events.len(),
        }
        .into());
    }
    let (raw_times, raw_events): (Vec<f64>, Vec<bool>) = (0..n)
        .map(|_| {
            let i = rng.gen_range(0..pool_times.len());
            (pool_times[i], pool_events[i])
        })
        .unzip();
    censor_by_enrollment(&raw_times, &raw_events, accrual, followup, rng)
}
