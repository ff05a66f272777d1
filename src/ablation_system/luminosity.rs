//! Radiated power and magnitude of the luminous trail.
//!
//! A fixed fraction (the luminous efficiency) of the kinetic energy
//! carried away by ablated mass is emitted as light. The magnitude scale
//! is anchored to a zero-magnitude power and referenced to a standard
//! observation distance.

use crate::constants::{MAGNITUDE_REFERENCE_DISTANCE, ZERO_MAGNITUDE_POWER};

pub struct LuminosityModel {
    luminous_efficiency: f64, // tau, 0-1
    magnitude_distance: f64,  // m, observer range for the distance term
}

impl LuminosityModel {
    pub fn new(luminous_efficiency: f64, magnitude_distance: f64) -> Self {
        LuminosityModel {
            luminous_efficiency,
            magnitude_distance,
        }
    }

    /// Radiated power in watts for a given mass loss rate (kg/s, zero or
    /// negative) and speed. Zero while the body is not ablating.
    pub fn radiated_power(&self, mass_loss_rate: f64, speed: f64) -> f64 {
        -0.5 * self.luminous_efficiency * mass_loss_rate * speed.powi(2)
    }

    /// Apparent magnitude of the trail, or `None` while no mass is being
    /// ablated (zero radiated power has no magnitude).
    pub fn magnitude(&self, mass_loss_rate: f64, speed: f64) -> Option<f64> {
        let power = self.radiated_power(mass_loss_rate, speed);
        if power <= 0.0 {
            return None;
        }

        let brightness = -2.5 * (power / ZERO_MAGNITUDE_POWER).log10();
        let distance_dimming =
            5.0 * (self.magnitude_distance / MAGNITUDE_REFERENCE_DISTANCE).log10();
        Some(brightness + distance_dimming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_ablation_means_no_magnitude() {
        let model = LuminosityModel::new(0.005, MAGNITUDE_REFERENCE_DISTANCE);
        assert!(model.magnitude(0.0, 16_000.0).is_none());
    }

    #[test]
    fn test_radiated_power_from_mass_loss() {
        let model = LuminosityModel::new(0.005, MAGNITUDE_REFERENCE_DISTANCE);

        // I = -(tau / 2) * (dm/dt) * v^2
        let power = model.radiated_power(-1.0e-5, 16_000.0);
        assert_relative_eq!(power, 6.4, max_relative = 1e-12);
    }

    #[test]
    fn test_magnitude_at_the_reference_distance() {
        let model = LuminosityModel::new(0.005, MAGNITUDE_REFERENCE_DISTANCE);

        let magnitude = model.magnitude(-1.0e-5, 16_000.0).unwrap();
        let expected = -2.5 * (6.4f64 / ZERO_MAGNITUDE_POWER).log10();
        assert_relative_eq!(magnitude, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_faster_ablation_is_brighter() {
        let model = LuminosityModel::new(0.005, MAGNITUDE_REFERENCE_DISTANCE);

        let faint = model.magnitude(-1.0e-6, 16_000.0).unwrap();
        let bright = model.magnitude(-1.0e-4, 16_000.0).unwrap();
        assert!(
            bright < faint,
            "More mass loss must give a smaller (brighter) magnitude"
        );
    }

    #[test]
    fn test_doubling_the_distance_dims_by_five_log_two() {
        let near = LuminosityModel::new(0.005, MAGNITUDE_REFERENCE_DISTANCE);
        let far = LuminosityModel::new(0.005, 2.0 * MAGNITUDE_REFERENCE_DISTANCE);

        let near_magnitude = near.magnitude(-1.0e-5, 16_000.0).unwrap();
        let far_magnitude = far.magnitude(-1.0e-5, 16_000.0).unwrap();

        assert_relative_eq!(
            far_magnitude - near_magnitude,
            5.0 * 2.0f64.log10(),
            max_relative = 1e-12
        );
    }
}
