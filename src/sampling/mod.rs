//----------------------------------------
// sampling mod
//----------------------------------------
pub mod curve_sampling;
pub mod dataset;
pub mod error;
pub mod types;

pub use curve_sampling::{draw_from_curve, sample_from_curve};
pub use dataset::{censor_by_enrollment, resample_dataset, sample_dataset};
pub use types::{ArmData, SampledArm};
