pub mod ablation_system;
pub mod configuration;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::meteoroid::{AblationPhase, MaterialProperties, MeteoroidBody};
pub use control::simulation::{
    run_batch, Simulation, SimulationOutput, SimulationRecord, SimulationStatus,
};
pub use errors::SimulationError;

// Re-export commonly used items from configuration
pub use configuration::config::{
    load_simulation_config, BodyConfig, InitialConditions, ScenarioFactory, SimulationConfig,
};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::atmosphere::{AtmosphereFit, AtmosphereSample, ExtrapolationWarning};
pub use trajectory_system::dynamics::{DynamicsIntegrator, TrajectoryState};

// Re-export commonly used items from ablation_system
pub use ablation_system::luminosity::LuminosityModel;
pub use ablation_system::thermal::{ThermalAblationModel, ThermalStep};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;
