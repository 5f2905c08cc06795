use rand::distributions::{Distribution, Open01};
use rand::{rngs, Rng, SeedableRng};

use crate::curve::types::KaplanMeierCurve;
use crate::sampling::types::SampledArm;

/// Inverse-CDF outcome for a single uniform draw `x` in (0, 1).
///
/// Returns (is_event, time). `x` at or below the last survival probability
/// means the subject outlives the curve and is censored at the last time.
/// Otherwise `i` is the first index with x > S(t_i): for i = 0 the event is
/// placed at the first time, else the time is interpolated between t_(i-1)
/// and t_i by where `x` falls between S(t_(i-1)) and S(t_i).
pub(crate) fn outcome_for(curve: &KaplanMeierCurve, x: f64) -> (bool, f64) {
    let time = curve.time();
    let probability = curve.probability();
    let last = probability.len() - 1;

    if x <= probability[last] {
        return (false, time[last]);
    }

    // x > probability[last], so some index is found
    let i = probability.iter().position(|&s| x > s).unwrap_or(last);
    if i == 0 {
        return (true, time[0]);
    }

    // probability[i - 1] >= x > probability[i], so the gap is non-zero
    let weight = (probability[i - 1] - x) / (probability[i - 1] - probability[i]);
    (true, time[i - 1] + weight * (time[i] - time[i - 1]))
}

/// Draws `count` outcomes from a curve using the supplied generator
pub fn draw_from_curve<R: Rng + ?Sized>(
    curve: &KaplanMeierCurve,
    count: usize,
    rng: &mut R,
) -> SampledArm {
    let (events, times) = (0..count)
        .map(|_| {
            let x: f64 = Open01.sample(&mut *rng);
            outcome_for(curve, x)
        })
        .unzip();
    SampledArm { times, events }
}

/// Draws `count` outcomes from a curve; the same seed always reproduces the
/// same output
pub fn sample_from_curve(curve: &KaplanMeierCurve, count: usize, seed: u64) -> SampledArm {
    let mut rng = rngs::StdRng::seed_from_u64(seed);
    draw_from_curve(curve, count, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::kaplan_meier::kaplan_meier;
    use crate::parametric::exponential::exponential_curve;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn step_curve() -> KaplanMeierCurve {
        KaplanMeierCurve::new(vec![0.0, 2.0, 4.0, 6.0], vec![1.0, 0.8, 0.5, 0.2]).unwrap()
    }

    #[test]
    fn interpolates_in_probability_space() {
        let (is_event, t) = outcome_for(&step_curve(), 0.65);
        assert!(is_event);
        assert_abs_diff_eq!(t, 3.0, epsilon = 1e-12);

        let (is_event, t) = outcome_for(&step_curve(), 0.9);
        assert!(is_event);
        assert_abs_diff_eq!(t, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn draw_equal_to_curve_probability() {
        // Equal to an interior probability: lands exactly on that time point
        let (is_event, t) = outcome_for(&step_curve(), 0.8);
        assert!(is_event);
        assert_abs_diff_eq!(t, 2.0, epsilon = 1e-12);

        // Equal to the last probability: censored
        assert_eq!(outcome_for(&step_curve(), 0.2), (false, 6.0));
    }

    #[test]
    fn draw_below_minimum_probability_is_censored() {
        assert_eq!(outcome_for(&step_curve(), 0.05), (false, 6.0));
    }

    #[test]
    fn draw_above_first_probability_is_event_at_first_time() {
        let curve = KaplanMeierCurve::new(vec![1.0, 2.0], vec![0.9, 0.5]).unwrap();
        assert_eq!(outcome_for(&curve, 0.95), (true, 1.0));
    }

    #[test]
    fn flat_curve_censors_everything() {
        let curve = KaplanMeierCurve::new(vec![0.0, 5.0, 9.0], vec![1.0, 1.0, 1.0]).unwrap();
        let sample = sample_from_curve(&curve, 500, 24601);
        assert!(sample.events.iter().all(|e| !e));
        assert!(sample.times.iter().all(|t| *t == 9.0));
    }

    #[test]
    fn zero_curve_is_all_events_at_first_time() {
        let curve = KaplanMeierCurve::new(vec![0.5, 5.0, 9.0], vec![0.0, 0.0, 0.0]).unwrap();
        let sample = sample_from_curve(&curve, 500, 24601);
        assert!(sample.events.iter().all(|e| *e));
        assert!(sample.times.iter().all(|t| *t == 0.5));
    }

    #[test]
    fn sampled_median_matches_reference() {
        let times: Vec<f64> = (0..=240).map(|i| i as f64 * 0.25).collect();
        let reference = exponential_curve(&times, 0.1).unwrap();
        let reference_median = reference.median().unwrap();

        let sample = sample_from_curve(&reference, 2000, 2460123456);
        let km = kaplan_meier(&sample.times, &sample.events).unwrap();
        let sampled_median = km.median().expect("sampled curve never crossed 0.5");
        assert!((sampled_median - reference_median).abs() / reference_median < 0.1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn seeds_control_output(seed_a in any::<u64>(), seed_b in any::<u64>()) {
            let curve = step_curve();
            let first = sample_from_curve(&curve, 50, seed_a);
            let again = sample_from_curve(&curve, 50, seed_a);
            prop_assert_eq!(&first, &again);
            prop_assume!(seed_a != seed_b);
            let other = sample_from_curve(&curve, 50, seed_b);
            prop_assert_ne!(first, other);
        }
    }
}
