use crate::curve::error::CurveError;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;

/// Proportional-hazards transform: S(t)^hazard_ratio at every point.
///
/// Used to build a treatment curve from a control curve, and to move a
/// curve between subgroups with different hazard ratios.
pub fn apply_hazard_ratio(
    curve: &KaplanMeierCurve,
    hazard_ratio: f64,
) -> Result<KaplanMeierCurve, CtsurvErr> {
    if !(hazard_ratio.is_finite() && hazard_ratio > 0.0) {
        return Err(CurveError::InvalidHazardRatio(hazard_ratio).into());
    }
    let adjusted = curve
        .probability()
        .iter()
        .map(|s| s.powf(hazard_ratio))
        .collect();
    curve.with_probability(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hazard_ratio_powers_probabilities() {
        let control = KaplanMeierCurve::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.81, 0.25]).unwrap();
        let treated = apply_hazard_ratio(&control, 0.5).expect("failed to apply hazard ratio");
        assert_eq!(treated.time(), control.time());
        assert_abs_diff_eq!(treated.probability()[1], 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(treated.probability()[2], 0.5, epsilon = 1e-12);
        assert!(treated.events_at_time().is_none());
    }

    #[test]
    fn unit_ratio_is_identity() {
        let control = KaplanMeierCurve::new(vec![0.0, 3.0], vec![1.0, 0.4]).unwrap();
        let same = apply_hazard_ratio(&control, 1.0).unwrap();
        assert_eq!(same.probability(), control.probability());
    }

    #[test]
    fn invalid_ratio_error() {
        let control = KaplanMeierCurve::new(vec![0.0, 3.0], vec![1.0, 0.4]).unwrap();
        assert!(apply_hazard_ratio(&control, 0.0).is_err());
        assert!(apply_hazard_ratio(&control, f64::NAN).is_err());
        assert!(apply_hazard_ratio(&control, -2.0).is_err());
    }
}
