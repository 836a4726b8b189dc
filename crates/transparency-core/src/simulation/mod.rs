//! Input/output simulation scenarios with optional output validation

mod runner;
mod types;

pub use runner::{DEFAULT_SIMULATION_RUNNER, SimulationRunner, run_simulations};
pub use types::{
    ScenarioFn, SimulationOutcome, SimulationScenario, SimulationSummary, ValidateFn,
};
