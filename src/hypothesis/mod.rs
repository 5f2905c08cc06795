//----------------------------------------
// hypothesis mod
//----------------------------------------
pub mod error;
pub mod likelihood_ratio;
pub mod log_rank;
pub mod rmst;
pub mod types;

pub use likelihood_ratio::{likelihood_ratio, permutation_test_p_value, MIN_LAMBDA};
pub use log_rank::log_rank_test;
pub use rmst::{calculate_rmst, calculate_rmst_variance, compare_rmst, rmst_test};
pub use types::{LogRankResult, RmstComparison};
