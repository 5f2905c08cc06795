//----------------------------------------
// mixture mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::mixture::error::MixtureError;

/// Subgroup weights and hazard ratios relative to a reference subgroup.
/// The first entry is the reference, so `hazard_ratios[0]` must be 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureModel {
    pub proportions: Vec<f64>,
    pub hazard_ratios: Vec<f64>,
}

impl MixtureModel {
    pub fn validate(&self) -> Result<(), CtsurvErr> {
        if self.proportions.len() <= 1 {
            return Err(MixtureError::TooFewSubgroups(self.proportions.len()).into());
        }
        if self.proportions.len() != self.hazard_ratios.len() {
            return Err(MixtureError::ProportionRatioLengths {
                proportions: self.proportions.len(),
                hazard_ratios: self.hazard_ratios.len(),
            }
            .into());
        }
        if self.hazard_ratios[0] != 1.0 {
            return Err(MixtureError::ReferenceRatio(self.hazard_ratios[0]).into());
        }
        if let Some(&r) = self
            .hazard_ratios
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(MixtureError::InvalidHazardRatio(r).into());
        }
        Ok(())
    }

    /// sum_i p_i s^r_i
    pub(crate) fn mix(&self, s: f64) -> f64 {
        self.proportions
            .iter()
            .zip(&self.hazard_ratios)
            .map(|(p, r)| p * s.powf(*r))
            .sum()
    }

    /// d/ds sum_i p_i s^r_i
    pub(crate) fn mix_slope(&self, s: f64) -> f64 {
        self.proportions
            .iter()
            .zip(&self.hazard_ratios)
            .map(|(p, r)| p * r * s.powf(r - 1.0))
            .sum()
    }
}

/// Subgroup sizes for one biomarker: the reference subgroup followed by the
/// comparison subgroups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgroupAllocation {
    pub reference: f64,
    pub comparisons: Vec<f64>,
}

impl SubgroupAllocation {
    pub fn proportions(&self) -> Vec<f64> {
        std::iter::once(self.reference)
            .chain(self.comparisons.iter().copied())
            .collect()
    }
}

/// Request to move an observed curve from one subgroup allocation to
/// another. `hazard_ratios` are those of the comparison subgroups against
/// the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationChange {
    pub biomarker: String,
    pub original: SubgroupAllocation,
    pub target: SubgroupAllocation,
    pub hazard_ratios: Vec<f64>,
}

impl AllocationChange {
    pub(crate) fn model(&self, allocation: &SubgroupAllocation) -> MixtureModel {
        MixtureModel {
            proportions: allocation.proportions(),
            hazard_ratios: std::iter::once(1.0)
                .chain(self.hazard_ratios.iter().copied())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCurve {
    pub name: String,
    pub curve: KaplanMeierCurve,
}

/// Curves produced by an allocation change, named `<biomarker>_<variant>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationAdjustment {
    pub reference: NamedCurve,
    pub subgroups: Vec<NamedCurve>,
    pub recomposed: NamedCurve,
}
