//----------------------------------------
// simulation mod
//----------------------------------------
pub mod error;
pub mod grid;
pub mod percentiles;
pub mod power_curve;
pub mod run_simulation;
pub mod study;
pub mod types;

pub use error::{SimulationError, TaskFailure};
pub use grid::{run_grid, GridOptions};
pub use percentiles::{get_percentiles, summarize};
pub use power_curve::min_sample_size_for_power;
pub use run_simulation::{run_simulation, run_simulation_until};
pub use study::{run_study, StudyReport};
pub use types::{
    CancellationToken, DataSource, GridProgress, PValueMethod, SampleSizeGrid, SimulationConfig,
    SimulationResult, SimulationSummary,
};
