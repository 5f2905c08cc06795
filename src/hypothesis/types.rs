//----------------------------------------
// hypothesis mod types
//----------------------------------------
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogRankResult {
    pub chi_square: f64,
    pub p_value: f64,
}

/// Two-sample RMST comparison; `difference` is treatment minus control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RmstComparison {
    pub control_rmst: f64,
    pub treat_rmst: f64,
    pub difference: f64,
    pub z_score: f64,
    pub p_value: f64,
}
