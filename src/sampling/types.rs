//----------------------------------------
// sampling mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::error::CtsurvErr;
use crate::sampling::error::SamplingError;

/// Observed data for one trial arm; `events[i]` is false when subject i was
/// censored at `time[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmData {
    pub arm_name: String,
    pub time: Vec<f64>,
    pub events: Vec<bool>,
}

impl ArmData {
    pub fn validate(&self) -> Result<(), CtsurvErr> {
        if self.time.len() != self.events.len() {
            return Err(SamplingError::ArmLengths {
                arm_name: self.arm_name.clone(),
                times: self.time.len(),
                events: self.events.len(),
            }
            .into());
        }
        if self.time.is_empty() {
            return Err(SamplingError::EmptyPool.into());
        }
        Ok(())
    }
}

/// One synthetic arm, times measured from each subject's enrollment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampledArm {
    pub times: Vec<f64>,
    pub events: Vec<bool>,
}

impl SampledArm {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.events.iter().filter(|e| **e).count()
    }
}
