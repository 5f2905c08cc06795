use log::debug;
use rand::{rngs, Rng, SeedableRng};

use crate::curve::hazard::apply_hazard_ratio;
use crate::curve::kaplan_meier::kaplan_meier;
use crate::curve::types::KaplanMeierCurve;
use crate::error::CtsurvErr;
use crate::hypothesis::likelihood_ratio::permutation_test_p_value;
use crate::hypothesis::log_rank::log_rank_test;
use crate::hypothesis::rmst::compare_rmst;
use crate::parametric::exponential::fit_exponential;
use crate::sampling::curve_sampling::draw_from_curve;
use crate::sampling::dataset::{censor_by_enrollment, resample_dataset, sample_dataset};
use crate::sampling::types::{ArmData, SampledArm};
use crate::simulation::error::SimulationError;
use crate::simulation::types::{
    CancellationToken, DataSource, PValueMethod, SimulationConfig, SimulationResult,
};

/// Seed for the task at one grid point; independent of scheduling order
pub(crate) fn task_seed(seed: u64, sample_size: usize) -> u64 {
    seed.wrapping_add((sample_size as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Per-task view of the data source, with derived pieces computed once
enum ArmSource<'a> {
    Exponential {
        control_hazard: f64,
        treat_hazard: f64,
    },
    Resample {
        control: &'a ArmData,
        treatment: &'a ArmData,
    },
    Curve {
        control: &'a KaplanMeierCurve,
        treatment: KaplanMeierCurve,
    },
}

impl<'a> ArmSource<'a> {
    fn new(source: &'a DataSource) -> Result<Self, CtsurvErr> {
        Ok(match source {
            DataSource::Exponential {
                base_hazard,
                hazard_ratio,
            } => ArmSource::Exponential {
                control_hazard: *base_hazard,
                treat_hazard: base_hazard * hazard_ratio,
            },
            DataSource::Resample { control, treatment } => {
                ArmSource::Resample { control, treatment }
            }
            DataSource::Curve {
                control,
                hazard_ratio,
            } => ArmSource::Curve {
                control,
                treatment: apply_hazard_ratio(control, *hazard_ratio)?,
            },
        })
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        n_ctrl: usize,
        n_treat: usize,
        accrual: f64,
        followup: f64,
        rng: &mut R,
    ) -> Result<(SampledArm, SampledArm), CtsurvErr> {
        match self {
            ArmSource::Exponential {
                control_hazard,
                treat_hazard,
            } => Ok((
                sample_dataset(*control_hazard, n_ctrl, accrual, followup, rng)?,
                sample_dataset(*treat_hazard, n_treat, accrual, followup, rng)?,
            )),
            ArmSource::Resample { control, treatment } => Ok((
                resample_dataset(&control.time, &control.events, n_ctrl, accrual, followup, rng)?,
                resample_dataset(
                    &treatment.time,
                    &treatment.events,
                    n_treat,
                    accrual,
                    followup,
                    rng,
                )?,
            )),
            ArmSource::Curve { control, treatment } => {
                let raw_ctrl = draw_from_curve(control, n_ctrl, rng);
                let raw_treat = draw_from_curve(treatment, n_treat, rng);
                Ok((
                    censor_by_enrollment(&raw_ctrl.times, &raw_ctrl.events, accrual, followup, rng)?,
                    censor_by_enrollment(
                        &raw_treat.times,
                        &raw_treat.events,
                        accrual,
                        followup,
                        rng,
                    )?,
                ))
            }
        }
    }
}

/// Runs every replicate for one sample size
pub fn run_simulation(
    sample_size: usize,
    config: &SimulationConfig,
) -> Result<SimulationResult, CtsurvErr> {
    run_simulation_until(sample_size, config, &CancellationToken::new())
}

/// As `run_simulation`, checking `cancel` before every replicate
pub fn run_simulation_until(
    sample_size: usize,
    config: &SimulationConfig,
    cancel: &CancellationToken,
) -> Result<SimulationResult, CtsurvErr> {
    config.validate()?;
    let (n_ctrl, n_treat) = config.arm_sizes(sample_size)?;
    let source = ArmSource::new(&config.source)?;
    let mut rng = rngs::StdRng::seed_from_u64(task_seed(config.seed, sample_size));

    let reps = config.dataset_sim_count;
    let mut base_hazard_dist = Vec::with_capacity(reps);
    let mut treat_hazard_dist = Vec::with_capacity(reps);
    let mut p_value_dist = Vec::with_capacity(reps);
    let mut rmst_p_value_dist = Vec::with_capacity(if config.rmst { reps } else { 0 });

    for _ in 0..reps {
        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled.into());
        }

        //----------------------------------------
        // Draw a two-arm trial
        let (control, treatment) =
            source.draw(n_ctrl, n_treat, config.accrual, config.followup, &mut rng)?;
        let control_curve = kaplan_meier(&control.times, &control.events)?;
        let treat_curve = kaplan_meier(&treatment.times, &treatment.events)?;

        //----------------------------------------
        // Hazard estimates
        base_hazard_dist.push(fit_exponential(&control_curve.survival_points()));
        treat_hazard_dist.push(fit_exponential(&treat_curve.survival_points()));

        //----------------------------------------
        // p-values
        let p_value = match config.p_value_method {
            PValueMethod::LogRank => {
                log_rank_test(
                    &control.times,
                    &control.events,
                    &treatment.times,
                    &treatment.events,
                )?
                .p_value
            }
            PValueMethod::Permutation { count } => permutation_test_p_value(
                &control.times,
                &control.events,
                &treatment.times,
                &treatment.events,
                count,
                &mut rng,
            )?,
        };
        p_value_dist.push(p_value);

        if config.rmst {
            let tau = config
                .rmst_tau
                .unwrap_or_else(|| control_curve.last_time().min(treat_curve.last_time()));
            rmst_p_value_dist.push(compare_rmst(&control_curve, &treat_curve, tau)?.p_value);
        }
    }

    debug!(
        "finished {} replicates at sample size {} ({} control, {} treatment)",
        reps, sample_size, n_ctrl, n_treat
    );

    Ok(SimulationResult {
        sample_size,
        base_hazard_dist,
        treat_hazard_dist,
        p_value_dist,
        rmst_p_value_dist: config.rmst.then_some(rmst_p_value_dist),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::percentiles::get_percentiles;

    fn exponential_config(reps: usize) -> SimulationConfig {
        SimulationConfig {
            dataset_sim_count: reps,
            ..Default::default()
        }
    }

    #[test]
    fn distributions_have_one_entry_per_replicate() {
        let result = run_simulation(200, &exponential_config(100)).expect("simulation failed");
        assert_eq!(result.sample_size, 200);
        assert_eq!(result.base_hazard_dist.len(), 100);
        assert_eq!(result.treat_hazard_dist.len(), 100);
        assert_eq!(result.p_value_dist.len(), 100);
        assert!(result.rmst_p_value_dist.is_none());
        assert!(result.p_value_dist.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn hazard_estimates_track_truth() {
        let result = run_simulation(400, &exponential_config(100)).unwrap();
        let base = get_percentiles(&result.base_hazard_dist, &[50.0]).unwrap()[0];
        let treat = get_percentiles(&result.treat_hazard_dist, &[50.0]).unwrap()[0];
        assert!((base - 0.05).abs() < 0.015, "base median {base}");
        assert!((treat - 0.03).abs() < 0.015, "treat median {treat}");
        assert!(treat < base);
    }

    #[test]
    fn same_seed_same_result() {
        let config = exponential_config(20);
        assert_eq!(
            run_simulation(120, &config).unwrap(),
            run_simulation(120, &config).unwrap()
        );
    }

    #[test]
    fn rmst_and_permutation_paths() {
        let config = SimulationConfig {
            dataset_sim_count: 10,
            p_value_method: PValueMethod::Permutation { count: 50 },
            rmst: true,
            ..Default::default()
        };
        let result = run_simulation(60, &config).unwrap();
        let rmst = result.rmst_p_value_dist.expect("rmst p-values missing");
        assert_eq!(rmst.len(), 10);
        assert!(rmst.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(result.p_value_dist.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn curve_and_resample_sources() {
        let control = KaplanMeierCurve::new(
            vec![0.0, 6.0, 12.0, 18.0, 24.0],
            vec![1.0, 0.75, 0.55, 0.4, 0.3],
        )
        .unwrap();
        let from_curve = SimulationConfig {
            dataset_sim_count: 10,
            source: DataSource::Curve {
                control,
                hazard_ratio: 0.7,
            },
            ..Default::default()
        };
        assert_eq!(run_simulation(80, &from_curve).unwrap().p_value_dist.len(), 10);

        let arm = |name: &str, scale: f64| ArmData {
            arm_name: name.to_string(),
            time: (1..=30).map(|i| i as f64 * scale).collect(),
            events: (1..=30).map(|i| i % 4 != 0).collect(),
        };
        let from_pool = SimulationConfig {
            dataset_sim_count: 10,
            source: DataSource::Resample {
                control: arm("control", 0.5),
                treatment: arm("treatment", 0.8),
            },
            ..Default::default()
        };
        assert_eq!(run_simulation(80, &from_pool).unwrap().p_value_dist.len(), 10);
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(
            run_simulation_until(100, &exponential_config(10), &cancel),
            Err(CtsurvErr::Simulation(SimulationError::Cancelled))
        ));
    }
}
