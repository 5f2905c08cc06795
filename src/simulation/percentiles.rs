use itertools::Itertools;

use crate::error::CtsurvErr;
use crate::simulation::error::SimulationError;
use crate::simulation::types::{SimulationResult, SimulationSummary};

/// Percentiles (0-100) with linear interpolation between order statistics:
/// rank = p / 100 * (n - 1) on the sorted data.
pub fn get_percentiles(data: &[f64], percentiles: &[f64]) -> Result<Vec<f64>, CtsurvErr> {
    if data.is_empty() {
        return Err(SimulationError::EmptyDistribution.into());
    }
    if let Some(&p) = percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
        return Err(SimulationError::PercentileOutOfBounds(p).into());
    }

    let sorted: Vec<f64> = data.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect();
    let last = sorted.len() - 1;
    Ok(percentiles
        .iter()
        .map(|p| {
            let rank = p / 100.0 * last as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(last);
            let weight = rank - lower as f64;
            sorted[lower] + weight * (sorted[upper] - sorted[lower])
        })
        .collect())
}

/// Reduces one sample size's distributions: 95% intervals for the hazard
/// estimates and the requested percentiles of the p-value distributions
pub fn summarize(
    result: &SimulationResult,
    pvalue_percentiles: &[f64],
) -> Result<SimulationSummary, CtsurvErr> {
    let base = get_percentiles(&result.base_hazard_dist, &[2.5, 97.5])?;
    let treat = get_percentiles(&result.treat_hazard_dist, &[2.5, 97.5])?;
    let rmst_pvalue_interval = result
        .rmst_p_value_dist
        .as_ref()
        .map(|dist| get_percentiles(dist, pvalue_percentiles))
        .transpose()?;

    Ok(SimulationSummary {
        sample_size: result.sample_size,
        base_interval: (base[0], base[1]),
        treat_interval: (treat[0], treat[1]),
        pvalue_interval: get_percentiles(&result.p_value_dist, pvalue_percentiles)?,
        rmst_pvalue_interval,
    })
}
