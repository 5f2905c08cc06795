//----------------------------------------
// design mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::curve::types::KaplanMeierCurve;
use crate::design::error::DesignError;
use crate::error::CtsurvErr;

/// Control-arm survival at the three points of Simpson's rule over the
/// administrative censoring window: follow-up, follow-up plus half the
/// accrual, and accrual plus follow-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpsonAnchors {
    pub at_followup: f64,
    pub at_mid: f64,
    pub at_end: f64,
}

impl SimpsonAnchors {
    pub fn from_curve(curve: &KaplanMeierCurve, accrual: f64, followup: f64) -> Self {
        Self {
            at_followup: curve.survival_at(followup),
            at_mid: curve.survival_at(followup + accrual / 2.0),
            at_end: curve.survival_at(accrual + followup),
        }
    }

    pub fn from_exponential(lambda: f64, accrual: f64, followup: f64) -> Self {
        let s = |t: f64| (-lambda * t).exp();
        Self {
            at_followup: s(followup),
            at_mid: s(followup + accrual / 2.0),
            at_end: s(accrual + followup),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CtsurvErr> {
        for s in [self.at_followup, self.at_mid, self.at_end] {
            if !(0.0..=1.0).contains(&s) {
                return Err(DesignError::AnchorOutOfBounds(s).into());
            }
        }
        Ok(())
    }

    /// Anchors of the arm whose survival is this one raised to `hazard_ratio`
    pub(crate) fn scaled(&self, hazard_ratio: f64) -> Self {
        Self {
            at_followup: self.at_followup.powf(hazard_ratio),
            at_mid: self.at_mid.powf(hazard_ratio),
            at_end: self.at_end.powf(hazard_ratio),
        }
    }
}

/// Inputs for a log-rank powered design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchoenfeldInputs {
    /// Two-sided type I error
    pub alpha: f64,
    /// Type II error (1 - power)
    pub beta: f64,
    pub treatment_proportion: f64,
    pub hazard_ratio: f64,
    pub accrual: f64,
    pub followup: f64,
    pub base_survival: SimpsonAnchors,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchoenfeldParameters {
    pub alpha_deviate: f64,
    pub beta_deviate: f64,
    pub numerator: f64,
    pub denominator: f64,
    pub event_count: f64,
    pub base_event_proportion: f64,
    pub treatment_event_proportion: f64,
    pub overall_event_proportion: f64,
    pub sample_size: usize,
}
