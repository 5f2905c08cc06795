use itertools::Itertools;

use crate::error::CtsurvErr;
use crate::hypothesis::error::check_arm;
use crate::hypothesis::types::LogRankResult;
use crate::util::distributions::chi_square_1df_sf;

/// Log-rank comparison of a control and a treatment arm.
///
/// Observed and expected counts are taken for the treatment arm at every
/// distinct time where any event occurred in the pooled data; the variance
/// is the hypergeometric one. Degenerate inputs (no events, empty arm,
/// identical arms) give chi-square 0 and p-value 1.
pub fn log_rank_test(
    control_times: &[f64],
    control_events: &[bool],
    treat_times: &[f64],
    treat_events: &[bool],
) -> Result<LogRankResult, CtsurvErr> {
    check_arm("control", control_times, control_events)?;
    check_arm("treatment", treat_times, treat_events)?;

    //----------------------------------------
    // Pool both arms, keeping the arm label
    // (time, is_event, is_treatment)
    let pooled: Vec<(f64, bool, bool)> = control_times
        .iter()
        .zip(control_events.iter())
        .map(|(&t, &e)| (t, e, false))
        .chain(
            treat_times
                .iter()
                .zip(treat_events.iter())
                .map(|(&t, &e)| (t, e, true)),
        )
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .collect();

    let event_times = pooled
        .iter()
        .filter(|(_, is_event, _)| *is_event)
        .map(|(t, _, _)| *t)
        .dedup();

    //----------------------------------------
    // Observed - expected and variance at each event time
    #[allow(non_snake_case)]
    let (O, E, V) = event_times.fold((0.0, 0.0, 0.0), |acc, t| {
        let at_risk: Vec<&(f64, bool, bool)> = pooled.iter().filter(|(s, _, _)| *s >= t).collect();
        let n_all = at_risk.len() as f64;
        let n_treat = at_risk.iter().filter(|(_, _, trt)| *trt).count() as f64;
        let n_ctrl = n_all - n_treat;

        let at_t = at_risk.iter().filter(|(s, is_event, _)| *s == t && *is_event);
        let d_all = at_t.clone().count() as f64;
        let d_treat = at_t.filter(|(_, _, trt)| *trt).count() as f64;

        let expected = if n_all > 0.0 { d_all * n_treat / n_all } else { 0.0 };
        let variance = if n_all > 1.0 {
            n_treat * n_ctrl * d_all * (n_all - d_all) / (n_all * n_all * (n_all - 1.0))
        } else {
            0.0
        };
        (acc.0 + d_treat, acc.1 + expected, acc.2 + variance)
    });

    let chi_square = if V > 0.0 { (O - E) * (O - E) / V } else { 0.0 };
    Ok(LogRankResult {
        chi_square,
        p_value: chi_square_1df_sf(chi_square),
    })
}
