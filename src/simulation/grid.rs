use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::CtsurvErr;
use crate::simulation::error::{SimulationError, TaskFailure};
use crate::simulation::run_simulation::run_simulation_until;
use crate::simulation::types::{CancellationToken, GridProgress, SimulationConfig, SimulationResult};

/// How a grid run is scheduled and observed
#[derive(Debug, Clone, Default)]
pub struct GridOptions {
    /// Worker threads; `None` lets rayon pick
    pub threads: Option<usize>,
    pub cancel: CancellationToken,
    pub progress: Option<Sender<GridProgress>>,
}

/// Runs one independent simulation task per sample size on a worker pool.
///
/// Results come back in the order of `sample_sizes`. Failed tasks don't
/// stop their siblings; once every task has finished, all failures are
/// reported together. Cancelling through `options.cancel` stops outstanding
/// tasks at their next replicate and this call returns only after all of
/// them have stopped.
pub fn run_grid(
    sample_sizes: &[usize],
    config: &SimulationConfig,
    options: &GridOptions,
) -> Result<Vec<SimulationResult>, CtsurvErr> {
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0))
        .build()
        .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;

    let total = sample_sizes.len();
    let completed = AtomicUsize::new(0);
    info!(
        "running {} simulation tasks with {} replicates each on {} threads",
        total,
        config.dataset_sim_count,
        pool.current_num_threads()
    );

    let outcomes: Vec<(usize, Result<SimulationResult, CtsurvErr>)> = pool.install(|| {
        sample_sizes
            .par_iter()
            .map(|&sample_size| {
                let outcome = run_simulation_until(sample_size, config, &options.cancel);
                if let Err(e) = &outcome {
                    warn!("simulation task for sample size {} failed: {}", sample_size, e);
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("{} of {} simulation tasks complete", done, total);
                if let Some(progress) = &options.progress {
                    // Nobody listening is fine
                    let _ = progress.send(GridProgress {
                        completed: done,
                        total,
                        sample_size,
                    });
                }
                (sample_size, outcome)
            })
            .collect()
    });

    if options.cancel.is_cancelled() {
        info!("simulation grid cancelled");
        return Err(SimulationError::Cancelled.into());
    }

    let mut results = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (sample_size, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => failures.push(TaskFailure {
                sample_size,
                message: e.to_string(),
            }),
        }
    }
    if !failures.is_empty() {
        return Err(SimulationError::TasksFailed(failures).into());
    }
    Ok(results)
}
