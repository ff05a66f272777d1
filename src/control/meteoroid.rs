use std::f64::consts::PI;

use serde::Deserialize;

/// Material constants of a meteoroid, immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialProperties {
    pub grain_density: f64,                  // kg/m³
    pub heat_of_ablation: f64,               // J/kg
    pub melting_point: f64,                  // K
    pub boiling_point: f64,                  // K
    pub specific_heat: f64,                  // J/(kg·K)
    pub condensation_coefficient: f64,       // psi, 0–1
    pub molar_mass: f64,                     // kg/mol
    pub thermal_conductivity: f64,           // W/(m·K)
    pub shape_factor: f64,                   // dimensionless, 1.21 for a sphere
    pub emissivity: f64,                     // 0–1
    pub porosity_reduction_temperature: f64, // K, onset of porous collapse
    pub drag_coefficient: f64,               // dimensionless
    pub luminous_efficiency: f64,            // tau, fraction of kinetic energy loss emitted
}

impl MaterialProperties {
    /// Heat-transfer coefficient derived from the condensation
    /// coefficient, free-molecular accommodation on both faces.
    pub fn heat_transfer_coefficient(&self) -> f64 {
        2.0 * self.condensation_coefficient
    }
}

/// Thermal phase of the body. Transitions are one-way under entry
/// heating; the porous structure collapses before the grains melt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AblationPhase {
    Solid,
    PorosityCollapsing,
    Molten,
    Ablating,
}

/// Per-meteoroid state integrated each step.
#[derive(Debug, Clone)]
pub struct MeteoroidBody {
    pub mass: f64,             // kg, never negative
    pub temperature: f64,      // K
    pub porosity: f64,         // 0–1, volume fraction of voids
    pub initial_porosity: f64, // reference for the collapse ramp
    pub phase: AblationPhase,
    pub material: MaterialProperties,
}

impl MeteoroidBody {
    pub fn new(mass: f64, temperature: f64, porosity: f64, material: MaterialProperties) -> Self {
        MeteoroidBody {
            mass,
            temperature,
            porosity,
            initial_porosity: porosity,
            phase: AblationPhase::Solid,
            material,
        }
    }

    /// Bulk density of the porous body.
    pub fn bulk_density(&self) -> f64 {
        self.material.grain_density * (1.0 - self.porosity)
    }

    /// Volume-equivalent radius in meters.
    pub fn radius(&self) -> f64 {
        (3.0 * self.mass / (4.0 * PI * self.bulk_density())).cbrt()
    }

    /// Cross-section in m² from mass, bulk density and shape factor.
    pub fn cross_section(&self) -> f64 {
        self.material.shape_factor * (self.mass / self.bulk_density()).powf(2.0 / 3.0)
    }

    pub fn is_burned_out(&self) -> bool {
        self.mass <= 0.0
    }
}
