use crate::curve::hazard::apply_hazard_ratio;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::mixture::decompose::fit_reference_survival;
use crate::mixture::types::{AllocationAdjustment, AllocationChange, MixtureModel, NamedCurve};

/// Forward mixture: S_new(t) = sum_i p_i S_ref(t)^r_i on the reference curve's grid.
///
/// Proportions are not normalised and need not sum to 1, but the mixed
/// curve is still a survival curve: weights that push any point above 1
/// are rejected as an out-of-bounds probability.
pub fn recompose_survival(
    reference: &KaplanMeierCurve,
    hazard_ratios: &[f64],
    proportions: &[f64],
) -> Result<KaplanMeierCurve, CtsurvErr> {
    let model = MixtureModel {
        proportions: proportions.to_vec(),
        hazard_ratios: hazard_ratios.to_vec(),
    };
    model.validate()?;
    let probability = reference.probability().iter().map(|s| model.mix(*s)).collect();
    reference.with_probability(probability)
}

/// Projects an observed curve onto a new subgroup allocation: decompose
/// under the original allocation, then recompose under the target one.
pub fn adjust_allocation(
    observed: &KaplanMeierCurve,
    change: &AllocationChange,
) -> Result<AllocationAdjustment, CtsurvErr> {
    let original = change.model(&change.original);
    let target = change.model(&change.target);

    let reference = fit_reference_survival(&original, observed)?;
    let subgroups = change
        .hazard_ratios
        .iter()
        .enumerate()
        .map(|(i, hr)| {
            Ok(NamedCurve {
                name: format!("{}_comparison_{}", change.biomarker, i + 1),
                curve: apply_hazard_ratio(&reference, *hr)?,
            })
        })
        .collect::<Result<Vec<NamedCurve>, CtsurvErr>>()?;
    let recomposed = recompose_survival(&reference, &target.hazard_ratios, &target.proportions)?;

    Ok(AllocationAdjustment {
        reference: NamedCurve {
            name: format!("{}_reference", change.biomarker),
            curve: reference,
        },
        subgroups,
        recomposed: NamedCurve {
            name: format!("{}_recomposed", change.biomarker),
            curve: recomposed,
        },
    })
}
