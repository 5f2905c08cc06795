//----------------------------------------
// config mod
//----------------------------------------
pub mod error;
pub mod types;

pub use types::{ReportSettings, StudyConfig};
