//----------------------------------------
// util mod
//----------------------------------------
pub mod distributions;
pub mod error;
