mod config;
mod simulator;

pub use config::SimulatorConfig;
pub use simulator::{estimate_win_probability, SimulationResults, Simulator, SimulatorError};
