//----------------------------------------
// curve mod
//----------------------------------------
pub mod error;
pub mod hazard;
pub mod kaplan_meier;
pub mod types;

pub use hazard::apply_hazard_ratio;
pub use kaplan_meier::kaplan_meier;
pub use types::{KaplanMeierCurve, KaplanMeierPayload};
