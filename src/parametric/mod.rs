//----------------------------------------
// parametric mod
//----------------------------------------
pub mod error;
pub mod exponential;
pub mod types;
pub mod weibull;

pub use exponential::{
    evaluate_exponential, exponential_curve, fit_exponential, lambda_from_median,
    median_from_lambda,
};
pub use types::SurvivalPoint;
pub use weibull::evaluate_weibull;
