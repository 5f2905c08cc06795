use itertools::Itertools;

use crate::curve::error::CurveError;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;

// Two-sided 95% normal deviate for the display band
const BAND_Z: f64 = 1.959963984540054;

/// Kaplan-Meier estimate from right-censored observations.
///
/// Times must be non-negative. Steps only occur at times where at least one
/// event was observed; the curve always starts with the anchor point (0, 1),
/// whose event and at-risk counts are 0, so events at time 0 give a second
/// point at time 0. The risk set at each event time is recounted over
/// the full observation list.
pub fn kaplan_meier(times: &[f64], events: &[bool]) -> Result<KaplanMeierCurve, CtsurvErr> {
    if times.len() != events.len() {
        return Err(CurveError::ObservationLengths {
            times: times.len(),
            events: events.len(),
        }
        .into());
    }

    if let Some(index) = times.iter().position(|t| !(*t >= 0.0)) {
        return Err(CurveError::NegativeTime {
            index,
            value: times[index],
        }
        .into());
    }

    let observations: Vec<(f64, bool)> = times
        .iter()
        .copied()
        .zip(events.iter().copied())
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .collect();

    let event_times: Vec<f64> = observations
        .iter()
        .filter(|(_, is_event)| *is_event)
        .map(|(t, _)| *t)
        .dedup()
        .collect();

    let mut curve_times = Vec::with_capacity(event_times.len() + 1);
    let mut probabilities = Vec::with_capacity(event_times.len() + 1);
    let mut events_at_time = Vec::with_capacity(event_times.len() + 1);
    let mut at_risk_at_time = Vec::with_capacity(event_times.len() + 1);
    let mut interval = Vec::with_capacity(event_times.len() + 1);
    curve_times.push(0.0);
    probabilities.push(1.0);
    events_at_time.push(0);
    at_risk_at_time.push(0);
    interval.push((1.0, 1.0));

    let mut survival = 1.0;
    let mut greenwood_sum = 0.0;
    for t in event_times {
        let n_events = observations
            .iter()
            .filter(|(s, is_event)| *s == t && *is_event)
            .count();
        let n_at_risk = observations.iter().filter(|(s, _)| *s >= t).count();

        if n_at_risk > 0 {
            survival *= 1.0 - n_events as f64 / n_at_risk as f64;
        }
        if n_at_risk > n_events {
            let (d, n) = (n_events as f64, n_at_risk as f64);
            greenwood_sum += d / (n * (n - d));
        }
        let half_width = BAND_Z * survival * greenwood_sum.sqrt();

        // Events at t = 0 get their own point after the anchor, at the same time
        curve_times.push(t);
        probabilities.push(survival);
        events_at_time.push(n_events);
        at_risk_at_time.push(n_at_risk);
        interval.push(((survival - half_width).max(0.0), (survival + half_width).min(1.0)));
    }

    KaplanMeierCurve::with_counts(curve_times, probabilities, events_at_time, at_risk_at_time)?
        .with_interval(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn known_case_with_ties_and_censoring() {
        let km = kaplan_meier(&[6.0, 6.0, 6.0, 7.0, 10.0], &[true, false, true, true, false])
            .expect("failed to estimate curve");
        assert_eq!(km.time(), &[0.0, 6.0, 7.0]);
        assert_abs_diff_eq!(km.probability()[0], 1.0);
        assert_abs_diff_eq!(km.probability()[1], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(km.probability()[2], 0.3, epsilon = 1e-12);
        assert_eq!(km.events_at_time().unwrap(), &[0, 2, 1]);
        assert_eq!(km.at_risk_at_time().unwrap(), &[0, 5, 2]);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let km = kaplan_meier(&[10.0, 7.0, 6.0, 6.0, 6.0], &[false, true, true, false, true])
            .expect("failed to estimate curve");
        assert_eq!(km.time(), &[0.0, 6.0, 7.0]);
        assert_abs_diff_eq!(km.probability()[2], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn empty_input_is_trivial_curve() {
        let km = kaplan_meier(&[], &[]).expect("failed to estimate curve");
        assert_eq!(km.time(), &[0.0]);
        assert_eq!(km.probability(), &[1.0]);
        assert_eq!(km.events_at_time().unwrap(), &[0]);
        assert_eq!(km.at_risk_at_time().unwrap(), &[0]);
    }

    #[test]
    fn censoring_only_is_trivial_curve() {
        let km = kaplan_meier(&[1.0, 4.0, 9.0], &[false, false, false])
            .expect("failed to estimate curve");
        assert_eq!(km.time(), &[0.0]);
        assert_eq!(km.probability(), &[1.0]);
    }

    #[test]
    fn mismatched_lengths_error() {
        if let Err(e) = kaplan_meier(&[1.0, 2.0], &[true]) {
            assert_eq!(
                String::from(
                    "while building survival curve: lengths of times and events don't \
                    match (times length 2, events length 1)"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn all_events_reach_zero() {
        let km = kaplan_meier(&[1.0, 2.0, 3.0], &[true, true, true]).unwrap();
        assert_abs_diff_eq!(km.probability()[3], 0.0);
        let band = km.interval().unwrap();
        assert_eq!(band.len(), km.len());
        assert!(band.iter().all(|(lo, hi)| 0.0 <= *lo && lo <= hi && *hi <= 1.0));
    }

    #[test]
    fn events_at_time_zero_keep_anchor() {
        let km = kaplan_meier(&[0.0, 1.0], &[true, true]).unwrap();
        assert_eq!(km.time(), &[0.0, 0.0, 1.0]);
        assert_eq!(km.probability(), &[1.0, 0.5, 0.0]);
        assert_eq!(km.events_at_time().unwrap(), &[0, 1, 1]);
        assert_eq!(km.at_risk_at_time().unwrap(), &[0, 2, 1]);
        assert_eq!(km.survival_at(0.0), 0.5);
    }

    #[test]
    fn negative_times_error() {
        if let Err(e) = kaplan_meier(&[2.0, -1.0, 3.0], &[true, true, false]) {
            assert_eq!(
                String::from(
                    "while building survival curve: times must be non-negative; got -1 at index 1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    fn observation() -> impl Strategy<Value = (f64, bool)> {
        // Exact zeros show up often enough to exercise the anchor
        (prop_oneof![Just(0.0_f64), 0.0_f64..100.0], any::<bool>())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn probability_non_increasing(
            data in proptest::collection::vec(observation(), 0..60)
        ) {
            let (times, events): (Vec<f64>, Vec<bool>) = data.into_iter().unzip();
            let km = kaplan_meier(&times, &events).unwrap();
            prop_assert_eq!(km.time()[0], 0.0);
            prop_assert_eq!(km.probability()[0], 1.0);
            for w in km.probability().windows(2) {
                prop_assert!(w[1] <= w[0]);
            }
            for (i, w) in km.time().windows(2).enumerate() {
                prop_assert!(w[1] > w[0] || (i == 0 && w[1] == 0.0));
            }
        }
    }
}
