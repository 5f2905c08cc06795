//----------------------------------------
// design mod
//----------------------------------------
pub mod error;
pub mod schoenfeld;
pub mod types;

pub use schoenfeld::simpson_event_proportion;
pub use types::{SchoenfeldInputs, SchoenfeldParameters, SimpsonAnchors};
