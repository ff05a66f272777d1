//! Simulation configuration: a single immutable value handed to the
//! driver. Construct it programmatically through [`ScenarioFactory`] or
//! deserialize it from a TOML file with [`load_simulation_config`]; either
//! way it is validated before the integration loop starts.

use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    MAGNITUDE_REFERENCE_DISTANCE, MAX_BODIES, MAX_SIMULATION_STEPS, SPEED_FLOOR, TIME_STEP,
};
use crate::control::meteoroid::MaterialProperties;
use crate::errors::SimulationError;
use crate::trajectory_system::atmosphere::AtmosphereFit;

/// Initial trajectory conditions shared by every body in the run.
#[derive(Debug, Clone, Deserialize)]
pub struct InitialConditions {
    pub begin_height: f64,     // m
    pub begin_speed: f64,      // m/s
    pub zenith_angle: f64,     // degrees from local vertical
    pub begin_temperature: f64, // K
}

/// One meteoroid entry in a (possibly multi-body) run.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyConfig {
    pub mass: f64,     // kg
    #[serde(default)]
    pub porosity: f64, // 0–1
    pub material: MaterialProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_time_step")]
    pub time_step: f64, // s
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_speed_floor")]
    pub speed_floor: f64, // m/s
    #[serde(default = "default_magnitude_distance")]
    pub magnitude_distance: f64, // m
    pub initial: InitialConditions,
    pub atmosphere: AtmosphereFit,
    pub bodies: Vec<BodyConfig>,
}

fn default_time_step() -> f64 {
    TIME_STEP
}

fn default_max_steps() -> usize {
    MAX_SIMULATION_STEPS
}

fn default_speed_floor() -> f64 {
    SPEED_FLOOR
}

fn default_magnitude_distance() -> f64 {
    MAGNITUDE_REFERENCE_DISTANCE
}

impl SimulationConfig {
    /// Fail fast on physically invalid input, before the loop starts.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.time_step <= 0.0 {
            return Err(config_error("time step must be positive"));
        }
        if self.max_steps == 0 {
            return Err(config_error("maximum step count must be positive"));
        }
        if self.speed_floor <= 0.0 {
            return Err(config_error("speed floor must be positive"));
        }
        if self.magnitude_distance <= 0.0 {
            return Err(config_error("magnitude distance must be positive"));
        }
        if self.bodies.is_empty() {
            return Err(config_error("at least one body is required"));
        }
        if self.bodies.len() > MAX_BODIES {
            return Err(config_error("at most 10 bodies are supported"));
        }
        if self.initial.begin_height <= 0.0 {
            return Err(config_error("begin height must be positive"));
        }
        if self.initial.begin_speed <= 0.0 {
            return Err(config_error("begin speed must be positive"));
        }
        if !(0.0..90.0).contains(&self.initial.zenith_angle) {
            return Err(config_error("zenith angle must be in [0, 90) degrees"));
        }
        if self.initial.begin_temperature <= 0.0 {
            return Err(config_error("begin temperature must be positive"));
        }
        if self.atmosphere.h_min >= self.atmosphere.h_max {
            return Err(config_error("atmosphere fit bounds are inverted"));
        }

        for body in &self.bodies {
            validate_body(body)?;
        }

        Ok(())
    }
}

fn validate_body(body: &BodyConfig) -> Result<(), SimulationError> {
    if body.mass < 0.0 {
        return Err(config_error("body mass must not be negative"));
    }
    if !(0.0..1.0).contains(&body.porosity) {
        return Err(config_error("porosity must be in [0, 1)"));
    }

    let material = &body.material;
    if material.grain_density <= 0.0 {
        return Err(config_error("grain density must be positive"));
    }
    if material.heat_of_ablation <= 0.0 {
        return Err(config_error("heat of ablation must be positive"));
    }
    if material.specific_heat <= 0.0 {
        return Err(config_error("specific heat must be positive"));
    }
    if material.melting_point >= material.boiling_point {
        return Err(config_error("melting point must lie below the boiling point"));
    }
    if material.porosity_reduction_temperature >= material.melting_point {
        return Err(config_error(
            "porosity reduction must start below the melting point",
        ));
    }
    if !(0.0..=1.0).contains(&material.condensation_coefficient)
        || material.condensation_coefficient == 0.0
    {
        return Err(config_error("condensation coefficient must be in (0, 1]"));
    }
    if !(0.0..=1.0).contains(&material.emissivity) {
        return Err(config_error("emissivity must be in [0, 1]"));
    }
    if material.molar_mass <= 0.0 {
        return Err(config_error("molar mass must be positive"));
    }
    if material.thermal_conductivity < 0.0 {
        return Err(config_error("thermal conductivity must not be negative"));
    }
    if material.shape_factor <= 0.0 {
        return Err(config_error("shape factor must be positive"));
    }
    if material.drag_coefficient <= 0.0 {
        return Err(config_error("drag coefficient must be positive"));
    }
    if !(0.0..=1.0).contains(&material.luminous_efficiency) {
        return Err(config_error("luminous efficiency must be in [0, 1]"));
    }

    Ok(())
}

fn config_error(message: &str) -> SimulationError {
    SimulationError::ConfigurationError(message.to_string())
}

/// Load and validate a simulation configuration from a TOML file.
pub fn load_simulation_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, SimulationError> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        SimulationError::ConfigurationError(format!(
            "failed to read {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    let config: SimulationConfig = toml::from_str(&contents).map_err(|e| {
        SimulationError::ConfigurationError(format!("failed to parse TOML: {}", e))
    })?;
    config.validate()?;
    Ok(config)
}

pub struct ScenarioFactory;

impl ScenarioFactory {
    /// Soft cometary material matching the reference entry dataset.
    pub fn cometary_material() -> MaterialProperties {
        MaterialProperties {
            grain_density: 700.0,
            heat_of_ablation: 6.6e6,
            melting_point: 1650.0,
            boiling_point: 1850.0,
            specific_heat: 450.0,
            condensation_coefficient: 0.95,
            molar_mass: 0.036,
            thermal_conductivity: 0.05,
            shape_factor: 1.21,
            emissivity: 0.35,
            porosity_reduction_temperature: 900.0,
            drag_coefficient: 1.0,
            luminous_efficiency: 0.005,
        }
    }

    /// Reference single-body entry: a 0.17 g cometary grain hitting the
    /// atmosphere at 16.8 km/s under a 75° zenith angle.
    pub fn create_reference_entry() -> SimulationConfig {
        SimulationConfig {
            time_step: TIME_STEP,
            max_steps: MAX_SIMULATION_STEPS,
            speed_floor: SPEED_FLOOR,
            magnitude_distance: MAGNITUDE_REFERENCE_DISTANCE,
            initial: InitialConditions {
                begin_height: 180_000.0,
                begin_speed: 16_824.81,
                zenith_angle: 75.0,
                begin_temperature: 290.0,
            },
            atmosphere: AtmosphereFit::earth(),
            bodies: vec![BodyConfig {
                mass: 1.691013e-4,
                porosity: 0.0,
                material: Self::cometary_material(),
            }],
        }
    }

    /// Same entry split into several independent bodies of equal mass.
    pub fn create_multi_body_entry(count: usize, total_mass: f64) -> SimulationConfig {
        let mut config = Self::create_reference_entry();
        let mass = total_mass / count as f64;
        config.bodies = (0..count)
            .map(|_| BodyConfig {
                mass,
                porosity: 0.0,
                material: Self::cometary_material(),
            })
            .collect();
        config
    }
}
