use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::Parser;
use ctsurv::config::StudyConfig;
use ctsurv::simulation::{run_study, CancellationToken, GridProgress};
use log::{error, info};

#[derive(Parser, Debug)]
#[clap(
    name = "ctsurv",
    version,
    about = "Simulated power over a sample-size grid for a time-to-event trial."
)]
struct Args {
    /// Study description in TOML
    #[clap(long, value_name = "PATH")]
    config: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let study = match StudyConfig::load(&args.config) {
        Ok(study) => study,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (sender, receiver) = crossbeam_channel::unbounded::<GridProgress>();
    let progress_log = thread::spawn(move || {
        for progress in receiver {
            info!(
                "{} of {} sample sizes complete (n = {})",
                progress.completed, progress.total, progress.sample_size
            );
        }
    });

    let start = Instant::now();
    let report = run_study(&study, CancellationToken::new(), Some(sender));
    // The sender was moved into the study and is dropped by now
    let _ = progress_log.join();

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Study ({} grid points): {:?}", report.summaries.len(), start.elapsed());

    println!(
        "{:>8}  {:>21}  {:>21}  p-value percentiles {:?}",
        "n", "control hazard 95%", "treatment hazard 95%", study.report.pvalue_percentiles
    );
    for summary in &report.summaries {
        println!(
            "{:>8}  ({:>8.5}, {:>8.5})  ({:>8.5}, {:>8.5})  {:.4?}",
            summary.sample_size,
            summary.base_interval.0,
            summary.base_interval.1,
            summary.treat_interval.0,
            summary.treat_interval.1,
            summary.pvalue_interval
        );
    }

    for (percentile, n) in &report.min_sample_sizes {
        match n {
            Some(n) => println!(
                "{}th percentile p-value reaches alpha = {} at n = {:.1}",
                percentile, study.report.alpha, n
            ),
            None => println!(
                "{}th percentile p-value never reaches alpha = {} on this grid",
                percentile, study.report.alpha
            ),
        }
    }
    ExitCode::SUCCESS
}
