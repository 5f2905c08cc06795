//----------------------------------------
// mixture mod
//----------------------------------------
pub mod decompose;
pub mod error;
pub mod recompose;
pub mod types;

pub use decompose::{
    fit_reference_survival, mixture_derivative, mixture_error, GRADIENT_SCALING, MAX_ITERATIONS,
    TOLERANCE,
};
pub use recompose::{adjust_allocation, recompose_survival};
pub use types::{AllocationAdjustment, AllocationChange, MixtureModel, NamedCurve, SubgroupAllocation};
