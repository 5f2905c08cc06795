use crate::curve::kaplan_meier::kaplan_meier;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::hypothesis::error::{check_arm, HypothesisError};
use crate::hypothesis::types::RmstComparison;
use crate::util::distributions::std_normal_cdf;

/// Restricted mean survival time: area under the step function up to tau.
///
/// The curve is treated as starting from (0, 1); the last step is clipped
/// at tau, and extended to tau if the curve ends earlier.
pub fn calculate_rmst(curve: &KaplanMeierCurve, tau: f64) -> Result<f64, CtsurvErr> {
    if !(tau >= 0.0) {
        return Err(HypothesisError::InvalidTau(tau).into());
    }
    if tau == 0.0 {
        return Ok(0.0);
    }

    let mut area = 0.0;
    let (mut prev_time, mut prev_surv) = (0.0, 1.0);
    for (t, s) in curve.points() {
        if t >= tau {
            return Ok(area + prev_surv * (tau - prev_time));
        }
        area += prev_surv * (t - prev_time);
        prev_time = t;
        prev_surv = s;
    }
    Ok(area + prev_surv * (tau - prev_time))
}

/// Greenwood-type variance of the RMST up to tau, with a D / (D - 1)
/// small-sample correction where D is the curve's total event count,
/// including events after tau. With D of 0 or 1 the correction is 1.
pub fn calculate_rmst_variance(curve: &KaplanMeierCurve, tau: f64) -> Result<f64, CtsurvErr> {
    let (events, at_risk) = match (curve.events_at_time(), curve.at_risk_at_time()) {
        (Some(events), Some(at_risk)) => (events, at_risk),
        _ => return Err(HypothesisError::MissingRiskSets.into()),
    };
    let rmst_tau = calculate_rmst(curve, tau)?;

    let total_events: usize = events.iter().sum();
    let mut variance = 0.0;
    for ((&t, &d), &n) in curve.time().iter().zip(events).zip(at_risk) {
        if t > tau {
            break;
        }
        if n == 0 || n == d {
            continue;
        }
        let remaining_area = rmst_tau - calculate_rmst(curve, t)?;
        let (d, n) = (d as f64, n as f64);
        variance += d / (n * (n - d)) * remaining_area * remaining_area;
    }

    let correction = if total_events > 1 {
        total_events as f64 / (total_events as f64 - 1.0)
    } else {
        1.0
    };
    Ok(variance * correction)
}

/// Two-sided z-test on the difference in RMST (treatment - control)
pub fn compare_rmst(
    control: &KaplanMeierCurve,
    treatment: &KaplanMeierCurve,
    tau: f64,
) -> Result<RmstComparison, CtsurvErr> {
    let control_rmst = calculate_rmst(control, tau)?;
    let treat_rmst = calculate_rmst(treatment, tau)?;
    let difference = treat_rmst - control_rmst;
    let se = (calculate_rmst_variance(control, tau)? + calculate_rmst_variance(treatment, tau)?)
        .sqrt();

    let (z_score, p_value) = if se == 0.0 {
        (f64::INFINITY, if difference == 0.0 { 1.0 } else { 0.0 })
    } else {
        let z = difference / se;
        (z, 2.0 * (1.0 - std_normal_cdf(z.abs())))
    };

    Ok(RmstComparison {
        control_rmst,
        treat_rmst,
        difference,
        z_score,
        p_value,
    })
}

/// RMST comparison straight from raw arm data. Without an explicit tau the
/// shorter of the two curves' last time point is used.
pub fn rmst_test(
    control_times: &[f64],
    control_events: &[bool],
    treat_times: &[f64],
    treat_events: &[bool],
    tau: Option<f64>,
) -> Result<RmstComparison, CtsurvErr> {
    check_arm("control", control_times, control_events)?;
    check_arm("treatment", treat_times, treat_events)?;
    let control = kaplan_meier(control_times, control_events)?;
    let treatment = kaplan_meier(treat_times, treat_events)?;
    let tau = tau.unwrap_or_else(|| control.last_time().min(treatment.last_time()));
    compare_rmst(&control, &treatment, tau)
}
