//----------------------------------------
// parametric mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::curve::types::KaplanMeierCurve;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    pub time: f64,
    pub surv_prob: f64,
}

impl KaplanMeierCurve {
    pub fn survival_points(&self) -> Vec<SurvivalPoint> {
        self.points()
            .map(|(time, surv_prob)| SurvivalPoint { time, surv_prob })
            .collect()
    }
}
