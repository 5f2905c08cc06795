use crate::design::error::DesignError;
use crate::design::types::{SchoenfeldInputs, SchoenfeldParameters, SimpsonAnchors};
use crate::error::CtsurvErr;
use crate::util::distributions::std_normal_quantile;

/// Probability of observing an event under uniform accrual, by Simpson's
/// rule: 1 - (S(f) + 4 S(f + a/2) + S(a + f)) / 6
pub fn simpson_event_proportion(anchors: &SimpsonAnchors) -> f64 {
    1.0 - (anchors.at_followup + 4.0 * anchors.at_mid + anchors.at_end) / 6.0
}

impl SchoenfeldInputs {
    fn validate(&self) -> Result<(), CtsurvErr> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(DesignError::InvalidAlpha(self.alpha).into());
        }
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(DesignError::InvalidBeta(self.beta).into());
        }
        let p = self.treatment_proportion;
        if !(p > 0.0 && p < 1.0) {
            return Err(DesignError::InvalidProportion(p).into());
        }
        let hr = self.hazard_ratio;
        if !(hr.is_finite() && hr > 0.0) || hr == 1.0 {
            return Err(DesignError::InvalidHazardRatio(hr).into());
        }
        let valid_window = |x: f64| x.is_finite() && x >= 0.0;
        if !(valid_window(self.accrual) && valid_window(self.followup)) {
            return Err(DesignError::InvalidWindow {
                accrual: self.accrual,
                followup: self.followup,
            }
            .into());
        }
        self.base_survival.validate()
    }

    /// Required events from the Schoenfeld formula and the sample size
    /// that yields them given each arm's event probability
    pub fn derive(&self) -> Result<SchoenfeldParameters, CtsurvErr> {
        self.validate()?;
        let p = self.treatment_proportion;

        //----------------------------------------
        // Events
        //----------------------------------------
        let alpha_deviate = std_normal_quantile(1.0 - self.alpha / 2.0)?;
        let beta_deviate = std_normal_quantile(1.0 - self.beta)?;
        let numerator = (alpha_deviate + beta_deviate).powi(2);
        let denominator = p * (1.0 - p) * self.hazard_ratio.ln().powi(2);
        let event_count = numerator / denominator;

        //----------------------------------------
        // Subjects
        //----------------------------------------
        let base_event_proportion = simpson_event_proportion(&self.base_survival);
        let treatment_event_proportion =
            simpson_event_proportion(&self.base_survival.scaled(self.hazard_ratio));
        let overall_event_proportion =
            (1.0 - p) * base_event_proportion + p * treatment_event_proportion;
        if overall_event_proportion <= 0.0 {
            return Err(DesignError::NoEvents.into());
        }

        Ok(SchoenfeldParameters {
            alpha_deviate,
            beta_deviate,
            numerator,
            denominator,
            event_count,
            base_event_proportion,
            treatment_event_proportion,
            overall_event_proportion,
            sample_size: (event_count / overall_event_proportion).ceil() as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parametric::exponential::exponential_curve;
    use approx::assert_abs_diff_eq;

    fn inputs() -> SchoenfeldInputs {
        SchoenfeldInputs {
            alpha: 0.05,
            beta: 0.2,
            treatment_proportion: 0.5,
            hazard_ratio: 0.6,
            accrual: 12.0,
            followup: 12.0,
            base_survival: SimpsonAnchors::from_exponential(0.05, 12.0, 12.0),
        }
    }

    #[test]
    fn schoenfeld_reference_design() {
        let params = inputs().derive().expect("design should derive");
        assert_abs_diff_eq!(params.alpha_deviate, 1.959964, epsilon = 1e-6);
        assert_abs_diff_eq!(params.beta_deviate, 0.841621, epsilon = 1e-6);
        assert_abs_diff_eq!(params.numerator, 7.848880, epsilon = 1e-5);
        assert_abs_diff_eq!(params.denominator, 0.0652357, epsilon = 1e-6);
        assert_abs_diff_eq!(params.event_count, 120.3157, epsilon = 1e-3);
        assert_abs_diff_eq!(params.base_event_proportion, 0.587286, epsilon = 1e-6);
        assert_abs_diff_eq!(params.treatment_event_proportion, 0.414096, epsilon = 1e-6);
        assert_abs_diff_eq!(params.overall_event_proportion, 0.500691, epsilon = 1e-6);
        assert_eq!(params.sample_size, 241);
    }

    #[test]
    fn curve_anchors_match_exponential() {
        let times: Vec<f64> = (0..=30).map(|i| i as f64).collect();
        let curve = exponential_curve(&times, 0.05).unwrap();
        let from_curve = SimpsonAnchors::from_curve(&curve, 12.0, 12.0);
        let exact = SimpsonAnchors::from_exponential(0.05, 12.0, 12.0);
        assert_abs_diff_eq!(from_curve.at_followup, exact.at_followup, epsilon = 1e-12);
        assert_abs_diff_eq!(from_curve.at_mid, exact.at_mid, epsilon = 1e-12);
        assert_abs_diff_eq!(from_curve.at_end, exact.at_end, epsilon = 1e-12);
    }

    #[test]
    fn unequal_allocation_needs_more_events() {
        let equal = inputs().derive().unwrap();
        let skewed = SchoenfeldInputs {
            treatment_proportion: 2.0 / 3.0,
            ..inputs()
        }
        .derive()
        .unwrap();
        assert!(skewed.event_count > equal.event_count);
    }

    #[test]
    fn null_hazard_ratio_error() {
        let null = SchoenfeldInputs {
            hazard_ratio: 1.0,
            ..inputs()
        };
        if let Err(e) = null.derive() {
            assert_eq!(
                String::from(
                    "while deriving trial design: hazard ratio should be positive and different \
                    from 1; got 1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn no_events_error() {
        let immortal = SchoenfeldInputs {
            base_survival: SimpsonAnchors {
                at_followup: 1.0,
                at_mid: 1.0,
                at_end: 1.0,
            },
            ..inputs()
        };
        assert!(immortal.derive().is_err());
        let bad_beta = SchoenfeldInputs {
            beta: 0.0,
            ..inputs()
        };
        assert!(bad_beta.derive().is_err());
    }
}
