use crossbeam_channel::Sender;
use log::info;
use serde::Serialize;

use crate::config::types::StudyConfig;
use crate::error::CtsurvErr;
use crate::simulation::grid::{run_grid, GridOptions};
use crate::simulation::percentiles::summarize;
use crate::simulation::power_curve::min_sample_size_for_power;
use crate::simulation::types::{CancellationToken, GridProgress, SimulationSummary};

/// Grid summaries plus the interpolated minimum sample size for each
/// requested p-value percentile, as (percentile, sample size)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyReport {
    pub summaries: Vec<SimulationSummary>,
    pub min_sample_sizes: Vec<(f64, Option<f64>)>,
}

impl StudyReport {
    /// Minimum sample size at the study's target percentile
    pub fn target_sample_size(&self, study: &StudyConfig) -> Option<f64> {
        self.min_sample_sizes
            .get(study.report.target_percentile)
            .and_then(|(_, n)| *n)
    }
}

/// Runs a whole study: validates it, sweeps the sample-size grid in
/// parallel and reduces every grid point into a power-curve summary
pub fn run_study(
    study: &StudyConfig,
    cancel: CancellationToken,
    progress: Option<Sender<GridProgress>>,
) -> Result<StudyReport, CtsurvErr> {
    study.validate()?;
    let sample_sizes = study.grid.sample_sizes()?;
    let options = GridOptions {
        threads: study.threads,
        cancel,
        progress,
    };
    let results = run_grid(&sample_sizes, &study.simulation, &options)?;

    let percentiles = &study.report.pvalue_percentiles;
    let summaries = results
        .iter()
        .map(|result| summarize(result, percentiles))
        .collect::<Result<Vec<_>, _>>()?;
    let min_sample_sizes = percentiles
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, min_sample_size_for_power(&summaries, study.report.alpha, i)))
        .collect();

    info!("study finished over {} grid points", summaries.len());
    Ok(StudyReport {
        summaries,
        min_sample_sizes,
    })
}
