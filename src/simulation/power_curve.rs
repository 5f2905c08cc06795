use crate::simulation::types::SimulationSummary;

/// Smallest sample size at which the p-value bound at `percentile_index`
/// (an index into `pvalue_interval`) reaches `alpha`, linearly interpolated
/// between the neighbouring grid points. `None` if no grid point gets there.
pub fn min_sample_size_for_power(
    summaries: &[SimulationSummary],
    alpha: f64,
    percentile_index: usize,
) -> Option<f64> {
    let mut points: Vec<(f64, f64)> = summaries
        .iter()
        .filter_map(|s| {
            s.pvalue_interval
                .get(percentile_index)
                .map(|p| (s.sample_size as f64, *p))
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let k = points.iter().position(|(_, p)| *p <= alpha)?;
    if k == 0 {
        return Some(points[0].0);
    }
    let (n_0, p_0) = points[k - 1];
    let (n_1, p_1) = points[k];
    Some(n_0 + (p_0 - alpha) / (p_0 - p_1) * (n_1 - n_0))
}
