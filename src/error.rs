//----------------------------------------
// Crate error type
//----------------------------------------
use crate::config::error::ConfigError;
use crate::curve::error::CurveError;
use crate::design::error::DesignError;
use crate::hypothesis::error::HypothesisError;
use crate::mixture::error::MixtureError;
use crate::parametric::error::ParametricError;
use crate::sampling::error::SamplingError;
use crate::simulation::error::SimulationError;
use crate::util::error::NormalDistErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtsurvErr {
    #[error("while building survival curve: {0}")]
    Curve(CurveError),
    #[error("while comparing survival arms: {0}")]
    Hypothesis(HypothesisError),
    #[error("while fitting parametric model: {0}")]
    Parametric(ParametricError),
    #[error("while decomposing survival mixture: {0}")]
    Mixture(MixtureError),
    #[error("while sampling survival data: {0}")]
    Sampling(SamplingError),
    #[error("while running simulation: {0}")]
    Simulation(SimulationError),
    #[error("while deriving trial design: {0}")]
    Design(DesignError),
    #[error("while evaluating normal distribution: {0}")]
    NormalDist(NormalDistErr),
    #[error("while loading configuration: {0}")]
    Config(ConfigError),
}
