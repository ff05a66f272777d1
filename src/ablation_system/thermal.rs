//! Heat and mass balance of the ablating body.
//!
//! Per step the model takes the kinetic energy flux intercepted by the
//! cross-section, subtracts radiative and conductive losses, and spends
//! the remainder on sensible heating until the boiling point is reached.
//! From then on the excess drives vaporization at the heat-of-ablation
//! rate while the surface stays isothermal at the boiling point.

use crate::constants::STEFAN_BOLTZMANN;
use crate::control::meteoroid::{AblationPhase, MeteoroidBody};
use crate::trajectory_system::atmosphere::AtmosphereSample;

/// Result of one thermal update, fed to the luminosity model.
#[derive(Debug, Clone, Copy)]
pub struct ThermalStep {
    pub heat_input: f64,     // W
    pub heat_loss: f64,      // W
    pub mass_loss_rate: f64, // kg/s, zero or negative
}

pub struct ThermalAblationModel {
    ambient_temperature: f64, // K, also the lower clamp for cooling
}

impl ThermalAblationModel {
    pub fn new(ambient_temperature: f64) -> Self {
        ThermalAblationModel {
            ambient_temperature,
        }
    }

    /// Advance temperature, mass, porosity and phase over one time step.
    ///
    /// Mass loss never drives the mass negative; the body is clamped to
    /// zero and reads as burned out within the same step.
    pub fn update(
        &self,
        body: &mut MeteoroidBody,
        sample: &AtmosphereSample,
        speed: f64,
        dt: f64,
    ) -> ThermalStep {
        let cross_section = body.cross_section();
        let radius = body.radius();
        let boiling_point = body.material.boiling_point;
        let heat_of_ablation = body.material.heat_of_ablation;
        let specific_heat = body.material.specific_heat;

        let heat_input = 0.5
            * body.material.heat_transfer_coefficient()
            * sample.density
            * speed.powi(3)
            * cross_section;

        // Radiating and conducting area taken equal to the drag
        // cross-section, with a (T - T_amb)/r gradient placeholder for
        // the conductive term.
        let radiative = body.material.emissivity
            * STEFAN_BOLTZMANN
            * (body.temperature.powi(4) - self.ambient_temperature.powi(4))
            * cross_section;
        let conductive = body.material.thermal_conductivity
            * (body.temperature - self.ambient_temperature)
            / radius
            * cross_section;
        let heat_loss = radiative + conductive;

        let net_heat = heat_input - heat_loss;

        let mut mass_loss_rate = 0.0;
        if body.temperature >= boiling_point && net_heat > 0.0 {
            // Ablation absorbs the excess isothermally at the boiling point.
            mass_loss_rate = -net_heat / heat_of_ablation;
            let remaining = body.mass + mass_loss_rate * dt;
            if remaining <= 0.0 {
                // Only the mass actually present can vaporize.
                mass_loss_rate = -body.mass / dt;
                body.mass = 0.0;
            } else {
                body.mass = remaining;
            }
        } else {
            let delta = net_heat * dt / (body.mass * specific_heat);
            body.temperature =
                (body.temperature + delta).clamp(self.ambient_temperature, boiling_point);
        }

        self.collapse_porosity(body);
        self.advance_phase(body, mass_loss_rate);

        ThermalStep {
            heat_input,
            heat_loss,
            mass_loss_rate,
        }
    }

    // Porous structure collapses on a linear temperature ramp between the
    // porosity-reduction threshold and the melting point. The min() keeps
    // the decay monotonic if the body later cools.
    fn collapse_porosity(&self, body: &mut MeteoroidBody) {
        if body.porosity <= 0.0 {
            return;
        }
        let material = &body.material;
        if body.temperature < material.porosity_reduction_temperature {
            return;
        }

        let ramp = (material.melting_point - body.temperature)
            / (material.melting_point - material.porosity_reduction_temperature);
        let ceiling = body.initial_porosity * ramp.clamp(0.0, 1.0);
        body.porosity = body.porosity.min(ceiling);
    }

    // Phase transitions are one-way under entry heating.
    fn advance_phase(&self, body: &mut MeteoroidBody, mass_loss_rate: f64) {
        let material = &body.material;
        let next = if mass_loss_rate < 0.0 || body.temperature >= material.boiling_point {
            AblationPhase::Ablating
        } else if body.temperature >= material.melting_point {
            AblationPhase::Molten
        } else if body.temperature >= material.porosity_reduction_temperature {
            AblationPhase::PorosityCollapsing
        } else {
            AblationPhase::Solid
        };
        body.phase = body.phase.max(next);
    }
}
