//----------------------------------------
// Root lib
//----------------------------------------
//! The purpose of this library is to provide the numerical core for
//! sample-size planning of oncology trials with time-to-event endpoints:
//! Kaplan-Meier estimation, log-rank / RMST / likelihood-ratio comparisons,
//! parametric overlays, survival-mixture decomposition, and Monte Carlo
//! simulation of power over a grid of sample sizes.

/// Configuration snapshots for a full sample-size study
pub mod config;
/// Survival curves: Kaplan-Meier estimation and hazard-ratio transforms
pub mod curve;
/// Closed-form (Schoenfeld) event count and sample size derivation
pub mod design;
/// This module contains error types
pub mod error;
/// Two-arm comparisons: log-rank, RMST and likelihood-ratio tests
pub mod hypothesis;
/// Decomposition/recomposition of curves across hazard-ratio subgroups
pub mod mixture;
/// Exponential and Weibull survival models
pub mod parametric;
/// Drawing synthetic trial arms from curves, hazards or observed data
pub mod sampling;
/// Per-sample-size simulation and the grid coordinator
pub mod simulation;
mod util;

pub use crate::error::CtsurvErr;
pub use crate::util::distributions::{chi_square_1df_sf, std_normal_cdf, std_normal_quantile};
