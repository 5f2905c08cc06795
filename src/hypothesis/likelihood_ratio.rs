use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CtsurvErr;
use crate::hypothesis::error::{check_arm, HypothesisError};

/// Rate substituted for a zero exponential rate estimate so ln(lambda) stays finite
pub const MIN_LAMBDA: f64 = 1e-6;

/// Exponential sufficient statistics: (event count, total time at risk)
fn sufficient_statistics<'a, I>(observations: I) -> (f64, f64)
where
    I: Iterator<Item = (&'a f64, &'a bool)>,
{
    observations.fold((0.0, 0.0), |(n, total), (t, is_event)| {
        (n + if *is_event { 1.0 } else { 0.0 }, total + t)
    })
}

fn rate_estimate(n_events: f64, total_time: f64) -> f64 {
    let rate = if total_time > 0.0 { n_events / total_time } else { 0.0 };
    if rate > 0.0 { rate } else { MIN_LAMBDA }
}

fn log_likelihood(n_events: f64, total_time: f64, lambda: f64) -> f64 {
    n_events * lambda.ln() - lambda * total_time
}

fn statistic(a: (f64, f64), b: (f64, f64)) -> f64 {
    let pooled = (a.0 + b.0, a.1 + b.1);
    let separate = log_likelihood(a.0, a.1, rate_estimate(a.0, a.1))
        + log_likelihood(b.0, b.1, rate_estimate(b.0, b.1));
    let common = log_likelihood(pooled.0, pooled.1, rate_estimate(pooled.0, pooled.1));
    2.0 * (separate - common)
}

/// Twice the log-likelihood ratio of a two-rate exponential model against a
/// single pooled rate.
pub fn likelihood_ratio(
    a_times: &[f64],
    a_events: &[bool],
    b_times: &[f64],
    b_events: &[bool],
) -> Result<f64, CtsurvErr> {
    check_arm("first", a_times, a_events)?;
    check_arm("second", b_times, b_events)?;
    Ok(statistic(
        sufficient_statistics(a_times.iter().zip(a_events)),
        sufficient_statistics(b_times.iter().zip(b_events)),
    ))
}

/// One-sided permutation p-value for the likelihood-ratio statistic.
///
/// The pooled (time, event) pairs are shuffled `sim_count` times and split
/// back into arms of the original sizes; the p-value is the fraction of
/// relabelled statistics at least as large as the observed one.
pub fn permutation_test_p_value<R: Rng + ?Sized>(
    a_times: &[f64],
    a_events: &[bool],
    b_times: &[f64],
    b_events: &[bool],
    sim_count: usize,
    rng: &mut R,
) -> Result<f64, CtsurvErr> {
    if sim_count == 0 {
        return Err(HypothesisError::NoPermutations.into());
    }
    let observed = likelihood_ratio(a_times, a_events, b_times, b_events)?;

    let mut pooled: Vec<(f64, bool)> = a_times
        .iter()
        .zip(a_events)
        .chain(b_times.iter().zip(b_events))
        .map(|(&t, &e)| (t, e))
        .collect();
    let split = a_times.len();

    let mut as_extreme = 0;
    for _ in 0..sim_count {
        pooled.shuffle(rng);
        let (a, b) = pooled.split_at(split);
        let null_statistic = statistic(
            sufficient_statistics(a.iter().map(|(t, e)| (t, e))),
            sufficient_statistics(b.iter().map(|(t, e)| (t, e))),
        );
        if null_statistic >= observed {
            as_extreme += 1;
        }
    }

    Ok(as_extreme as f64 / sim_count as f64)
}
